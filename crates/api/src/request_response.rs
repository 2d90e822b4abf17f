// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use crate::messenger::OutboundMessage;
use four_to_score::{ParticipantStatus, StatusReport, StatusSource};
use four_to_score_domain::{OverrideKind, ParticipantOutcome, PickOutcome};

/// The reply to an inbound chat message.
///
/// `text` goes straight back to the sender. `outbound` holds anything else
/// the message caused to be sent, such as an admin-requested summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundReply {
    /// Reply to the sender.
    pub text: String,
    /// Further messages to deliver.
    pub outbound: Vec<OutboundMessage>,
}

impl InboundReply {
    /// A reply with nothing else to send.
    #[must_use]
    pub const fn text(text: String) -> Self {
        Self {
            text,
            outbound: Vec::new(),
        }
    }
}

/// API response for saved picks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitPicksResponse {
    /// The gameweek the picks are for.
    pub gameweek: u32,
    /// The submitter's handle.
    pub handle: String,
    /// The submitter's display name.
    pub display_name: String,
    /// The four picks after spelling correction.
    pub players: Vec<String>,
    /// The gameweek deadline, formatted for people.
    pub deadline_formatted: String,
    /// A success message.
    pub message: String,
}

/// API response for a recorded scoring result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordScoringResponse {
    /// The gameweek.
    pub gameweek: u32,
    /// The player as typed.
    pub player: String,
    /// The canonical lookup key.
    pub player_key: String,
    /// Whether the player scored.
    pub scored: bool,
    /// A success message.
    pub message: String,
}

/// API response for an eliminate or reinstate command.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverrideResponse {
    /// The gameweek.
    pub gameweek: u32,
    /// The participant's handle.
    pub handle: String,
    /// The participant's display name.
    pub display_name: String,
    /// What was requested.
    pub kind: OverrideKind,
    /// False when the participant was already in the requested state.
    pub changed: bool,
    /// A human-readable result.
    pub message: String,
}

/// Current gameweek information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeriodInfo {
    /// The current gameweek.
    pub gameweek: u32,
    /// The deadline as RFC 3339 in the schedule timezone.
    pub deadline: String,
    /// The deadline formatted for people.
    pub deadline_formatted: String,
    /// Whether the deadline has passed.
    pub deadline_passed: bool,
    /// Whether picks are still accepted.
    pub is_open: bool,
}

/// One pick in a status report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PickInfo {
    /// The player as submitted.
    pub player: String,
    /// Result so far.
    pub outcome: PickOutcome,
}

/// One participant in a status report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParticipantStatusInfo {
    /// The participant's handle.
    pub handle: String,
    /// The participant's display name.
    pub display_name: String,
    /// Effective picks; empty when nothing was submitted.
    pub picks: Vec<PickInfo>,
    /// Aggregate outcome.
    pub outcome: ParticipantOutcome,
    /// The override in force, if it decided the outcome.
    pub override_kind: Option<OverrideKind>,
}

impl From<&ParticipantStatus> for ParticipantStatusInfo {
    fn from(status: &ParticipantStatus) -> Self {
        Self {
            handle: status.participant.handle().to_string(),
            display_name: status.participant.display_name().to_string(),
            picks: status
                .picks
                .iter()
                .map(|pick| PickInfo {
                    player: pick.player.clone(),
                    outcome: pick.outcome,
                })
                .collect(),
            outcome: status.outcome,
            override_kind: match status.source {
                StatusSource::Computed => None,
                StatusSource::Override(kind) => Some(kind),
            },
        }
    }
}

/// API response for a gameweek status report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusReportResponse {
    /// The gameweek.
    pub gameweek: u32,
    /// When the report was computed (RFC 3339).
    pub computed_at: String,
    /// Number of winners.
    pub won: usize,
    /// Number still in the running.
    pub pending: usize,
    /// Number out.
    pub lost: usize,
    /// Every known participant, sorted by display name.
    pub participants: Vec<ParticipantStatusInfo>,
}

impl From<&StatusReport> for StatusReportResponse {
    fn from(report: &StatusReport) -> Self {
        Self {
            gameweek: report.gameweek,
            computed_at: report.computed_at.to_rfc3339(),
            won: report.count(ParticipantOutcome::Won),
            pending: report.count(ParticipantOutcome::Pending),
            lost: report.count(ParticipantOutcome::Lost),
            participants: report
                .participants
                .iter()
                .map(ParticipantStatusInfo::from)
                .collect(),
        }
    }
}
