// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status computation.
//!
//! Status is never stored. It is rebuilt from three append-style record sets
//! for a gameweek: submissions, scoring events and manual overrides.
//!
//! ## Override precedence
//!
//! The latest override for a participant decides their status until a
//! scoring event for one of that participant's effective picks is recorded
//! after the override. From then on status is computed from picks again.

use chrono::{DateTime, Utc};
use four_to_score_domain::{
    OverrideKind, Participant, ParticipantOutcome, PickOutcome, ScoringEvent, StatusOverride,
    Submission, aggregate_outcome, canonical_player_name,
};
use std::collections::HashMap;

/// Everything recorded for one gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodRecords {
    /// Every submission, in storage order.
    pub submissions: Vec<Submission>,
    /// Every scoring event, in storage order.
    pub scoring_events: Vec<ScoringEvent>,
    /// Every override, in storage order.
    pub overrides: Vec<StatusOverride>,
}

/// Returns each submitter's effective submission.
///
/// The effective submission is the one with the latest timestamp; on equal
/// timestamps the later-stored one wins. Results keep the order in which
/// submitters first appear.
#[must_use]
pub fn effective_submissions(submissions: &[Submission]) -> Vec<&Submission> {
    let mut order: Vec<&str> = Vec::new();
    let mut latest: HashMap<&str, &Submission> = HashMap::new();

    for submission in submissions {
        match latest.get(submission.submitter.as_str()) {
            Some(current) if current.submitted_at > submission.submitted_at => {}
            Some(_) => {
                latest.insert(&submission.submitter, submission);
            }
            None => {
                order.push(&submission.submitter);
                latest.insert(&submission.submitter, submission);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|submitter| latest.get(submitter).copied())
        .collect()
}

/// Returns the effective scoring event per canonical player key.
#[must_use]
pub fn effective_scoring_events(events: &[ScoringEvent]) -> HashMap<&str, &ScoringEvent> {
    let mut latest: HashMap<&str, &ScoringEvent> = HashMap::new();
    for event in events {
        let replace: bool = latest
            .get(event.player_key.as_str())
            .is_none_or(|current| current.updated_at <= event.updated_at);
        if replace {
            latest.insert(&event.player_key, event);
        }
    }
    latest
}

/// Returns the latest override for `handle`, if any.
#[must_use]
pub fn effective_override<'a>(
    overrides: &'a [StatusOverride],
    handle: &str,
) -> Option<&'a StatusOverride> {
    overrides
        .iter()
        .filter(|record| record.participant == handle)
        .fold(None, |latest: Option<&StatusOverride>, record| match latest {
            Some(current) if current.created_at > record.created_at => Some(current),
            _ => Some(record),
        })
}

/// One pick and its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickStatus {
    /// The player as submitted.
    pub player: String,
    /// Result against the recorded scoring events.
    pub outcome: PickOutcome,
}

/// What decided a participant's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    /// Computed from picks and scoring events.
    Computed,
    /// Forced by an admin override.
    Override(OverrideKind),
}

/// A participant's derived status for a gameweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantStatus {
    /// The participant.
    pub participant: Participant,
    /// Effective picks with results. Empty when nothing was submitted.
    pub picks: Vec<PickStatus>,
    /// Aggregate outcome.
    pub outcome: ParticipantOutcome,
    /// What decided the outcome.
    pub source: StatusSource,
}

impl ParticipantStatus {
    /// Returns true if the participant has an effective submission.
    #[must_use]
    pub fn has_submission(&self) -> bool {
        !self.picks.is_empty()
    }

    /// Returns true if an admin override decided the outcome.
    #[must_use]
    pub const fn is_overridden(&self) -> bool {
        matches!(self.source, StatusSource::Override(_))
    }
}

/// Status of every known participant for a gameweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// The gameweek.
    pub gameweek: u32,
    /// Participants sorted by display name.
    pub participants: Vec<ParticipantStatus>,
    /// When the report was computed.
    pub computed_at: DateTime<Utc>,
}

impl StatusReport {
    /// Looks up a participant's status by handle.
    #[must_use]
    pub fn find(&self, handle: &str) -> Option<&ParticipantStatus> {
        self.participants
            .iter()
            .find(|status| status.participant.handle() == handle)
    }

    /// Number of participants with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: ParticipantOutcome) -> usize {
        self.participants
            .iter()
            .filter(|status| status.outcome == outcome)
            .count()
    }

    /// Every participant in the report.
    #[must_use]
    pub fn known_participants(&self) -> Vec<Participant> {
        self.participants
            .iter()
            .map(|status| status.participant.clone())
            .collect()
    }
}

/// Returns the roster plus anyone else who submitted for the gameweek.
///
/// Submitters missing from the roster are known under the display name they
/// submitted with.
#[must_use]
pub fn known_participants(roster: &[Participant], records: &PeriodRecords) -> Vec<Participant> {
    let mut known: Vec<Participant> = roster.to_vec();
    for submission in effective_submissions(&records.submissions) {
        if known
            .iter()
            .any(|participant| participant.handle() == submission.submitter)
        {
            continue;
        }
        if let Ok(participant) = Participant::new(&submission.submitter, &submission.display_name)
        {
            known.push(participant);
        }
    }
    known
}

/// Computes every known participant's status for a gameweek.
#[must_use]
pub fn compute_status_report(
    gameweek: u32,
    roster: &[Participant],
    records: &PeriodRecords,
    now: DateTime<Utc>,
) -> StatusReport {
    let submissions: Vec<&Submission> = effective_submissions(&records.submissions);
    let events: HashMap<&str, &ScoringEvent> = effective_scoring_events(&records.scoring_events);

    let mut participants: Vec<ParticipantStatus> = known_participants(roster, records)
        .into_iter()
        .map(|participant| {
            let submission: Option<&Submission> = submissions
                .iter()
                .find(|submission| submission.submitter == participant.handle())
                .copied();
            participant_status(participant, submission, &events)
        })
        .collect();

    for status in &mut participants {
        let latest: Option<&StatusOverride> =
            effective_override(&records.overrides, status.participant.handle());
        apply_override_precedence(status, latest, &events);
    }

    participants.sort_by(|a, b| {
        a.participant
            .display_name()
            .to_lowercase()
            .cmp(&b.participant.display_name().to_lowercase())
            .then_with(|| a.participant.handle().cmp(b.participant.handle()))
    });

    StatusReport {
        gameweek,
        participants,
        computed_at: now,
    }
}

fn participant_status(
    participant: Participant,
    submission: Option<&Submission>,
    events: &HashMap<&str, &ScoringEvent>,
) -> ParticipantStatus {
    let picks: Vec<PickStatus> = submission
        .map(|submission| {
            submission
                .players
                .iter()
                .map(|player| PickStatus {
                    player: player.clone(),
                    outcome: pick_outcome(player, events),
                })
                .collect()
        })
        .unwrap_or_default();

    let outcomes: Vec<PickOutcome> = picks.iter().map(|pick| pick.outcome).collect();

    ParticipantStatus {
        participant,
        picks,
        outcome: aggregate_outcome(&outcomes),
        source: StatusSource::Computed,
    }
}

fn pick_outcome(player: &str, events: &HashMap<&str, &ScoringEvent>) -> PickOutcome {
    match events.get(canonical_player_name(player).as_str()) {
        Some(event) if event.scored => PickOutcome::Scored,
        Some(_) => PickOutcome::DidNotScore,
        None => PickOutcome::Unknown,
    }
}

fn apply_override_precedence(
    status: &mut ParticipantStatus,
    latest: Option<&StatusOverride>,
    events: &HashMap<&str, &ScoringEvent>,
) {
    let Some(record) = latest else {
        return;
    };
    if status.picks.is_empty() {
        return;
    }

    let superseded: bool = status.picks.iter().any(|pick| {
        events
            .get(canonical_player_name(&pick.player).as_str())
            .is_some_and(|event| event.updated_at > record.created_at)
    });
    if superseded {
        return;
    }

    status.outcome = record.kind.imposed_outcome();
    status.source = StatusSource::Override(record.kind);
}

/// Players with a recorded result for a gameweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerListing {
    /// The gameweek.
    pub gameweek: u32,
    /// Players recorded as scoring, sorted.
    pub scored: Vec<String>,
    /// Players recorded as not scoring, sorted.
    pub not_scored: Vec<String>,
}

impl ScorerListing {
    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scored.is_empty() && self.not_scored.is_empty()
    }
}

/// Splits the gameweek's effective scoring events into scored and not
/// scored.
#[must_use]
pub fn scorer_listing(gameweek: u32, records: &PeriodRecords) -> ScorerListing {
    let mut scored: Vec<String> = Vec::new();
    let mut not_scored: Vec<String> = Vec::new();

    for event in effective_scoring_events(&records.scoring_events).into_values() {
        if event.scored {
            scored.push(event.player_display.clone());
        } else {
            not_scored.push(event.player_display.clone());
        }
    }
    scored.sort_by_key(|name| name.to_lowercase());
    not_scored.sort_by_key(|name| name.to_lowercase());

    ScorerListing {
        gameweek,
        scored,
        not_scored,
    }
}

/// One participant's effective picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// The participant.
    pub participant: Participant,
    /// The effective picks.
    pub players: Vec<String>,
}

/// Who picked what for a gameweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    /// The gameweek.
    pub gameweek: u32,
    /// Participants with an effective submission, sorted by display name.
    pub entries: Vec<SummaryEntry>,
    /// Roster participants with no submission, sorted by display name.
    pub missing: Vec<Participant>,
}

/// Builds the full-period picks summary.
#[must_use]
pub fn period_summary(gameweek: u32, roster: &[Participant], records: &PeriodRecords) -> PeriodSummary {
    let submissions: Vec<&Submission> = effective_submissions(&records.submissions);

    let mut entries: Vec<SummaryEntry> = Vec::new();
    let mut missing: Vec<Participant> = Vec::new();
    for participant in known_participants(roster, records) {
        match submissions
            .iter()
            .find(|submission| submission.submitter == participant.handle())
        {
            Some(submission) => entries.push(SummaryEntry {
                participant,
                players: submission.players.clone(),
            }),
            None => missing.push(participant),
        }
    }

    entries.sort_by_key(|entry| entry.participant.display_name().to_lowercase());
    missing.sort_by_key(|participant| participant.display_name().to_lowercase());

    PeriodSummary {
        gameweek,
        entries,
        missing,
    }
}
