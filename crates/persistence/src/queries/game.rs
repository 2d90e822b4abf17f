// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use four_to_score_domain::{OverrideKind, ScoringEvent, StatusOverride, Submission};

use crate::data_models::{gameweek_from_db, gameweek_to_db, parse_timestamp};
use crate::diesel_schema::{scoring_events, status_overrides, submissions};
use crate::error::PersistenceError;

/// Diesel Queryable struct for submission rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = submissions)]
struct SubmissionRow {
    #[allow(dead_code)]
    submission_id: i64,
    gameweek: i32,
    submitter: String,
    display_name: String,
    players_json: String,
    submitted_at: String,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = PersistenceError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            submitter: row.submitter,
            display_name: row.display_name,
            gameweek: gameweek_from_db(row.gameweek)?,
            players: serde_json::from_str(&row.players_json)?,
            submitted_at: parse_timestamp(&row.submitted_at)?,
        })
    }
}

/// Diesel Queryable struct for scoring event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = scoring_events)]
struct ScoringEventRow {
    #[allow(dead_code)]
    scoring_event_id: i64,
    gameweek: i32,
    player_key: String,
    player_display: String,
    scored: bool,
    updated_at: String,
}

impl TryFrom<ScoringEventRow> for ScoringEvent {
    type Error = PersistenceError;

    fn try_from(row: ScoringEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            gameweek: gameweek_from_db(row.gameweek)?,
            player_key: row.player_key,
            player_display: row.player_display,
            scored: row.scored,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Diesel Queryable struct for override rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = status_overrides)]
struct OverrideRow {
    #[allow(dead_code)]
    override_id: i64,
    gameweek: i32,
    participant: String,
    kind: String,
    actor: String,
    created_at: String,
}

impl TryFrom<OverrideRow> for StatusOverride {
    type Error = PersistenceError;

    fn try_from(row: OverrideRow) -> Result<Self, Self::Error> {
        let kind: OverrideKind = row.kind.parse()?;
        Ok(Self {
            gameweek: gameweek_from_db(row.gameweek)?,
            participant: row.participant,
            kind,
            actor: row.actor,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Lists every submission for a gameweek in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_submissions(
    conn: &mut SqliteConnection,
    gameweek: u32,
) -> Result<Vec<Submission>, PersistenceError> {
    submissions::table
        .filter(submissions::gameweek.eq(gameweek_to_db(gameweek)?))
        .order(submissions::submission_id.asc())
        .select(SubmissionRow::as_select())
        .load::<SubmissionRow>(conn)?
        .into_iter()
        .map(Submission::try_from)
        .collect()
}

/// Counts submissions for a gameweek, including superseded ones.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_submissions(
    conn: &mut SqliteConnection,
    gameweek: u32,
) -> Result<i64, PersistenceError> {
    Ok(submissions::table
        .filter(submissions::gameweek.eq(gameweek_to_db(gameweek)?))
        .count()
        .get_result(conn)?)
}

/// Lists every scoring event for a gameweek.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_scoring_events(
    conn: &mut SqliteConnection,
    gameweek: u32,
) -> Result<Vec<ScoringEvent>, PersistenceError> {
    scoring_events::table
        .filter(scoring_events::gameweek.eq(gameweek_to_db(gameweek)?))
        .order(scoring_events::scoring_event_id.asc())
        .select(ScoringEventRow::as_select())
        .load::<ScoringEventRow>(conn)?
        .into_iter()
        .map(ScoringEvent::try_from)
        .collect()
}

/// Looks up the scoring event for one player.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn find_scoring_event(
    conn: &mut SqliteConnection,
    gameweek: u32,
    player_key: &str,
) -> Result<Option<ScoringEvent>, PersistenceError> {
    scoring_events::table
        .filter(scoring_events::gameweek.eq(gameweek_to_db(gameweek)?))
        .filter(scoring_events::player_key.eq(player_key))
        .select(ScoringEventRow::as_select())
        .first::<ScoringEventRow>(conn)
        .optional()?
        .map(ScoringEvent::try_from)
        .transpose()
}

/// Lists every override for a gameweek in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_overrides(
    conn: &mut SqliteConnection,
    gameweek: u32,
) -> Result<Vec<StatusOverride>, PersistenceError> {
    status_overrides::table
        .filter(status_overrides::gameweek.eq(gameweek_to_db(gameweek)?))
        .order(status_overrides::override_id.asc())
        .select(OverrideRow::as_select())
        .load::<OverrideRow>(conn)?
        .into_iter()
        .map(StatusOverride::try_from)
        .collect()
}
