// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured timezone is not a known IANA zone.
    InvalidTimezone(String),
    /// Gameweek ordinals are positive.
    InvalidGameweek(u32),
    /// A configured period violates its own ordering invariants.
    InvalidPeriod {
        /// The gameweek of the offending period.
        gameweek: u32,
        /// Why the period was rejected.
        reason: String,
    },
    /// A naive local datetime does not map to exactly one instant.
    UnresolvableLocalTime {
        /// The local datetime as configured.
        datetime: String,
        /// The schedule timezone.
        timezone: String,
    },
    /// A submission did not contain the required number of picks.
    InvalidPickCount {
        /// Number of picks required.
        expected: usize,
        /// Number of picks found.
        found: usize,
    },
    /// A player name was empty after trimming.
    EmptyPlayerName,
    /// A participant handle was empty after trimming.
    EmptyParticipantHandle,
    /// An override kind string was not recognised.
    InvalidOverrideKind(String),
    /// An outcome string was not recognised.
    InvalidOutcome(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidGameweek(gameweek) => {
                write!(f, "Invalid gameweek {gameweek}: must be greater than 0")
            }
            Self::InvalidPeriod { gameweek, reason } => {
                write!(f, "Invalid period for gameweek {gameweek}: {reason}")
            }
            Self::UnresolvableLocalTime { datetime, timezone } => {
                write!(
                    f,
                    "Local time {datetime} is ambiguous or does not exist in {timezone}"
                )
            }
            Self::InvalidPickCount { expected, found } => {
                write!(f, "Expected exactly {expected} picks, found {found}")
            }
            Self::EmptyPlayerName => write!(f, "Player name must not be empty"),
            Self::EmptyParticipantHandle => {
                write!(f, "Participant handle must not be empty")
            }
            Self::InvalidOverrideKind(kind) => write!(f, "Invalid override kind: {kind}"),
            Self::InvalidOutcome(outcome) => write!(f, "Invalid outcome: {outcome}"),
        }
    }
}

impl std::error::Error for DomainError {}
