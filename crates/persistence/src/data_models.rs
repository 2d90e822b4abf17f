// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Renders a timestamp for storage.
///
/// Fixed-width UTC with microseconds, so text order matches time order.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| {
            PersistenceError::ReconstructionError(format!("Invalid timestamp '{value}': {e}"))
        })
}

/// Converts a gameweek to its column type.
pub fn gameweek_to_db(gameweek: u32) -> Result<i32, PersistenceError> {
    i32::try_from(gameweek)
        .map_err(|_| PersistenceError::QueryFailed(format!("Gameweek {gameweek} out of range")))
}

/// Converts a stored gameweek back to its domain type.
pub fn gameweek_from_db(gameweek: i32) -> Result<u32, PersistenceError> {
    u32::try_from(gameweek).map_err(|_| {
        PersistenceError::ReconstructionError(format!("Stored gameweek {gameweek} is negative"))
    })
}
