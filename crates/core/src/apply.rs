// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::status::{ParticipantStatus, StatusReport};
use chrono::{DateTime, Utc};
use four_to_score_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use four_to_score_domain::{OverrideKind, Participant, ScoringEvent, StatusOverride};

/// The result of recording a scoring event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringResult {
    /// The event to upsert.
    pub event: ScoringEvent,
    /// The audit event recording this change.
    pub audit_event: AuditEvent,
}

/// The result of an eliminate or reinstate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideResult {
    /// The override changes the participant's status and must be stored.
    Applied {
        /// The participant affected.
        participant: Participant,
        /// The override to append.
        record: StatusOverride,
        /// The audit event recording this change.
        audit_event: AuditEvent,
    },
    /// The participant is already in the requested state; nothing to store.
    Unchanged {
        /// The participant matched.
        participant: Participant,
    },
}

/// Finds the participant an admin command refers to.
///
/// An exact handle match wins outright. Otherwise the target is compared
/// with display names ignoring case, and exactly one must match.
///
/// # Errors
///
/// Returns `CoreError::MissingTarget` for an empty target,
/// `CoreError::ParticipantNotFound` when nothing matches and
/// `CoreError::AmbiguousParticipant` when several names match.
pub fn resolve_target<'a>(
    target: &str,
    participants: &'a [Participant],
) -> Result<&'a Participant, CoreError> {
    let target: &str = target.trim();
    if target.is_empty() {
        return Err(CoreError::MissingTarget {
            command: String::from("participant"),
        });
    }

    if let Some(participant) = participants
        .iter()
        .find(|participant| participant.handle_matches(target))
    {
        return Ok(participant);
    }

    let matches: Vec<&Participant> = participants
        .iter()
        .filter(|participant| participant.name_matches(target))
        .collect();

    match matches.as_slice() {
        [] => Err(CoreError::ParticipantNotFound(target.to_string())),
        [participant] => Ok(participant),
        several => Err(CoreError::AmbiguousParticipant {
            target: target.to_string(),
            candidates: several
                .iter()
                .map(|participant| {
                    format!("{} ({})", participant.display_name(), participant.handle())
                })
                .collect(),
        }),
    }
}

/// Records whether a player scored, producing the event to upsert and an
/// audit event.
///
/// # Arguments
///
/// * `gameweek` - The gameweek the result belongs to
/// * `player` - The player name as the admin typed it
/// * `scored` - Whether the player scored
/// * `previous` - The currently stored event for the same player, if any
/// * `actor` - The admin recording the result
/// * `cause` - The message that triggered the change
/// * `now` - When the result is recorded
///
/// # Errors
///
/// Returns an error if the player name is empty.
pub fn apply_scoring(
    gameweek: u32,
    player: &str,
    scored: bool,
    previous: Option<&ScoringEvent>,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<ScoringResult, CoreError> {
    let event: ScoringEvent = ScoringEvent::new(gameweek, player, scored, now)?;

    let before: StateSnapshot = previous.map_or_else(StateSnapshot::absent, scoring_snapshot);
    let after: StateSnapshot = scoring_snapshot(&event);
    let verb: &str = if scored { "scored" } else { "did not score" };
    let action: Action = Action::new(
        String::from("RecordScore"),
        Some(format!("{} {verb} in gameweek {gameweek}", event.player_key)),
    );

    let audit_event: AuditEvent =
        AuditEvent::new(gameweek, actor, cause, action, before, after, now);

    Ok(ScoringResult { event, audit_event })
}

fn scoring_snapshot(event: &ScoringEvent) -> StateSnapshot {
    StateSnapshot::new(format!(
        "player={},scored={}",
        event.player_key, event.scored
    ))
}

/// Applies an eliminate or reinstate command against the current report.
///
/// Eliminating a participant who has already lost, or reinstating one who
/// has not, is a no-op and reports [`OverrideResult::Unchanged`].
///
/// # Errors
///
/// Returns an error if the target does not resolve to exactly one
/// participant in the report.
pub fn apply_override(
    report: &StatusReport,
    target: &str,
    kind: OverrideKind,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<OverrideResult, CoreError> {
    let known: Vec<Participant> = report.known_participants();
    let participant: Participant = resolve_target(target, &known)?.clone();

    let Some(current) = report.find(participant.handle()) else {
        return Err(CoreError::ParticipantNotFound(target.to_string()));
    };
    // No picks means out for the period, whatever the override.
    if !current.has_submission() || kind.is_redundant_for(current.outcome) {
        return Ok(OverrideResult::Unchanged { participant });
    }

    let record: StatusOverride = StatusOverride {
        gameweek: report.gameweek,
        participant: participant.handle().to_string(),
        kind,
        actor: actor.id.clone(),
        created_at: now,
    };

    let before: StateSnapshot = outcome_snapshot(current);
    let after: StateSnapshot = StateSnapshot::new(format!(
        "participant={},outcome={}",
        participant.handle(),
        kind.imposed_outcome().as_str()
    ));
    let action: Action = Action::new(
        match kind {
            OverrideKind::Eliminate => String::from("Eliminate"),
            OverrideKind::Reinstate => String::from("Reinstate"),
        },
        Some(format!(
            "{} {kind}d in gameweek {}",
            participant.display_name(),
            report.gameweek
        )),
    );

    let audit_event: AuditEvent =
        AuditEvent::new(report.gameweek, actor, cause, action, before, after, now);

    Ok(OverrideResult::Applied {
        participant,
        record,
        audit_event,
    })
}

fn outcome_snapshot(status: &ParticipantStatus) -> StateSnapshot {
    StateSnapshot::new(format!(
        "participant={},outcome={}",
        status.participant.handle(),
        status.outcome.as_str()
    ))
}
