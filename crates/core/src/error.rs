// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use four_to_score_domain::DomainError;

/// Errors that can occur while routing or applying admin commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A command keyword was sent without the name it acts on.
    MissingTarget {
        /// The keyword as recognised (e.g., `"eliminate"`).
        command: String,
    },
    /// No known participant matches the target.
    ParticipantNotFound(String),
    /// More than one participant matches the target.
    AmbiguousParticipant {
        /// The target as typed.
        target: String,
        /// Display names of every match.
        candidates: Vec<String>,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::MissingTarget { command } => {
                write!(f, "Command '{command}' needs a name after it")
            }
            Self::ParticipantNotFound(target) => {
                write!(f, "No participant matches '{target}'")
            }
            Self::AmbiguousParticipant { target, candidates } => {
                write!(
                    f,
                    "'{target}' matches more than one participant: {}",
                    candidates.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
