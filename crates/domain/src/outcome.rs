// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pick and participant outcomes.
//!
//! A participant wins a gameweek only when all four picks score. Any pick
//! recorded as not scoring loses the gameweek immediately; otherwise the
//! participant stays pending until every pick has a recorded result.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result of a single pick against the recorded scoring events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickOutcome {
    /// The player is recorded as having scored.
    Scored,
    /// The player is recorded as not having scored.
    DidNotScore,
    /// No result has been recorded for the player yet.
    Unknown,
}

impl PickOutcome {
    /// Returns the string representation of the outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scored => "scored",
            Self::DidNotScore => "did_not_score",
            Self::Unknown => "unknown",
        }
    }
}

/// Aggregate status of a participant for a gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantOutcome {
    /// All four picks scored.
    Won,
    /// A pick did not score, no picks were submitted, or an admin
    /// eliminated the participant.
    Lost,
    /// Still in the running.
    Pending,
}

impl ParticipantOutcome {
    /// Returns the string representation of the outcome.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Pending => "pending",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            "pending" => Ok(Self::Pending),
            _ => Err(DomainError::InvalidOutcome(s.to_string())),
        }
    }
}

impl FromStr for ParticipantOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A manual status change made by an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    /// Force the participant out.
    Eliminate,
    /// Put the participant back in the running.
    Reinstate,
}

impl OverrideKind {
    /// Returns the string representation of the override.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eliminate => "eliminate",
            Self::Reinstate => "reinstate",
        }
    }

    /// The outcome this override imposes.
    #[must_use]
    pub const fn imposed_outcome(&self) -> ParticipantOutcome {
        match self {
            Self::Eliminate => ParticipantOutcome::Lost,
            Self::Reinstate => ParticipantOutcome::Pending,
        }
    }

    /// Returns true if applying this override to a participant currently at
    /// `current` would change nothing.
    ///
    /// Eliminating someone who has already lost, or reinstating someone who
    /// is still in, is a no-op.
    #[must_use]
    pub const fn is_redundant_for(&self, current: ParticipantOutcome) -> bool {
        match self {
            Self::Eliminate => matches!(current, ParticipantOutcome::Lost),
            Self::Reinstate => !matches!(current, ParticipantOutcome::Lost),
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "eliminate" => Ok(Self::Eliminate),
            "reinstate" => Ok(Self::Reinstate),
            _ => Err(DomainError::InvalidOverrideKind(s.to_string())),
        }
    }
}

impl FromStr for OverrideKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combines pick outcomes into the participant's outcome.
///
/// Lost if any pick did not score; otherwise pending if any pick is unknown;
/// otherwise won. An empty slice means no picks were submitted, which is a
/// loss.
#[must_use]
pub fn aggregate_outcome(picks: &[PickOutcome]) -> ParticipantOutcome {
    if picks.is_empty() || picks.contains(&PickOutcome::DidNotScore) {
        ParticipantOutcome::Lost
    } else if picks.contains(&PickOutcome::Unknown) {
        ParticipantOutcome::Pending
    } else {
        ParticipantOutcome::Won
    }
}
