// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use four_to_score::CoreError;
use four_to_score_domain::DomainError;
use four_to_score_persistence::PersistenceError;
use std::convert::Infallible;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant has a chat reply (see [`crate::compose::error_reply`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An admin target matched more than one participant.
    AmbiguousTarget {
        /// The target as typed.
        target: String,
        /// Every matching participant, as `"Name (handle)"`.
        candidates: Vec<String>,
    },
    /// The schedule has no gameweek for the current time.
    NoActivePeriod,
    /// Picks for the gameweek are closed.
    DeadlinePassed {
        /// The closed gameweek.
        gameweek: u32,
    },
    /// The store could not be read or written.
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An outbound message could not be delivered.
    DeliveryFailed {
        /// The recipient handle.
        recipient: String,
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::AmbiguousTarget { target, candidates } => {
                write!(
                    f,
                    "'{target}' is ambiguous: matches {}",
                    candidates.join(", ")
                )
            }
            Self::NoActivePeriod => write!(f, "No active gameweek"),
            Self::DeadlinePassed { gameweek } => {
                write!(f, "The deadline for gameweek {gameweek} has passed")
            }
            Self::StoreUnavailable { message } => write!(f, "Store unavailable: {message}"),
            Self::DeliveryFailed { recipient, message } => {
                write!(f, "Delivery to {recipient} failed: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

impl From<Infallible> for ApiError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimezone(tz) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown timezone '{tz}'"),
        },
        DomainError::InvalidGameweek(gameweek) => ApiError::InvalidInput {
            field: String::from("gameweek"),
            message: format!("Gameweek {gameweek} is not valid"),
        },
        DomainError::InvalidPeriod { gameweek, reason } => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: format!("Gameweek {gameweek}: {reason}"),
        },
        DomainError::UnresolvableLocalTime { datetime, timezone } => ApiError::InvalidInput {
            field: String::from("schedule"),
            message: format!("{datetime} does not exist exactly once in {timezone}"),
        },
        DomainError::InvalidPickCount { expected, found } => ApiError::InvalidInput {
            field: String::from("picks"),
            message: format!("Please send exactly {expected} player names (found {found})"),
        },
        DomainError::EmptyPlayerName => ApiError::InvalidInput {
            field: String::from("player"),
            message: String::from("Player name is missing"),
        },
        DomainError::EmptyParticipantHandle => ApiError::InvalidInput {
            field: String::from("participant"),
            message: String::from("Participant handle is missing"),
        },
        DomainError::InvalidOverrideKind(kind) => ApiError::InvalidInput {
            field: String::from("override"),
            message: format!("Unknown override '{kind}'"),
        },
        DomainError::InvalidOutcome(outcome) => ApiError::InvalidInput {
            field: String::from("outcome"),
            message: format!("Unknown outcome '{outcome}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::MissingTarget { command } => ApiError::InvalidInput {
            field: String::from("target"),
            message: format!("Add a name after '{command}'"),
        },
        CoreError::ParticipantNotFound(target) => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("No one called '{target}' is playing this gameweek"),
        },
        CoreError::AmbiguousParticipant { target, candidates } => {
            ApiError::AmbiguousTarget { target, candidates }
        }
    }
}
