// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use four_to_score_domain::{ScoringEvent, StatusOverride, Submission};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_timestamp, gameweek_to_db};
use crate::diesel_schema::{scoring_events, status_overrides, submissions};
use crate::error::PersistenceError;

/// Appends a submission.
///
/// # Returns
///
/// The row ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn append_submission(
    conn: &mut SqliteConnection,
    submission: &Submission,
) -> Result<i64, PersistenceError> {
    let players_json: String = serde_json::to_string(&submission.players)?;

    diesel::insert_into(submissions::table)
        .values((
            submissions::gameweek.eq(gameweek_to_db(submission.gameweek)?),
            submissions::submitter.eq(&submission.submitter),
            submissions::display_name.eq(&submission.display_name),
            submissions::players_json.eq(players_json),
            submissions::submitted_at.eq(format_timestamp(&submission.submitted_at)),
        ))
        .execute(conn)?;

    let submission_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        submission_id,
        gameweek = submission.gameweek,
        submitter = %submission.submitter,
        "Persisted submission"
    );
    Ok(submission_id)
}

/// Inserts a scoring event or replaces the one for the same player.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_scoring_event(
    conn: &mut SqliteConnection,
    event: &ScoringEvent,
) -> Result<(), PersistenceError> {
    diesel::insert_into(scoring_events::table)
        .values((
            scoring_events::gameweek.eq(gameweek_to_db(event.gameweek)?),
            scoring_events::player_key.eq(&event.player_key),
            scoring_events::player_display.eq(&event.player_display),
            scoring_events::scored.eq(event.scored),
            scoring_events::updated_at.eq(format_timestamp(&event.updated_at)),
        ))
        .on_conflict((scoring_events::gameweek, scoring_events::player_key))
        .do_update()
        .set((
            scoring_events::player_display.eq(excluded(scoring_events::player_display)),
            scoring_events::scored.eq(excluded(scoring_events::scored)),
            scoring_events::updated_at.eq(excluded(scoring_events::updated_at)),
        ))
        .execute(conn)?;

    debug!(
        gameweek = event.gameweek,
        player = %event.player_key,
        scored = event.scored,
        "Persisted scoring event"
    );
    Ok(())
}

/// Appends a status override.
///
/// # Returns
///
/// The row ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_override(
    conn: &mut SqliteConnection,
    record: &StatusOverride,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(status_overrides::table)
        .values((
            status_overrides::gameweek.eq(gameweek_to_db(record.gameweek)?),
            status_overrides::participant.eq(&record.participant),
            status_overrides::kind.eq(record.kind.as_str()),
            status_overrides::actor.eq(&record.actor),
            status_overrides::created_at.eq(format_timestamp(&record.created_at)),
        ))
        .execute(conn)?;

    let override_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        override_id,
        gameweek = record.gameweek,
        participant = %record.participant,
        kind = %record.kind,
        "Persisted status override"
    );
    Ok(override_id)
}
