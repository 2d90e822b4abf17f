// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the 4 to Score picks bot.
//!
//! Submissions, scoring events, overrides and the audit trail are stored in
//! `SQLite` through Diesel. The schema is created by embedded migrations on
//! every connection, so a fresh file or in-memory database is usable
//! immediately.
//!
//! ## Storage rules
//!
//! - Submissions, overrides and audit events are append-only
//! - Scoring events are unique on `(gameweek, player_key)` and upserted
//! - Timestamps are stored as fixed-width RFC 3339 UTC text
//! - Nothing derived (status, summaries) is stored

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use four_to_score::{
    AuditRepository, OverrideRepository, Repository, ScoringEventRepository,
    SubmissionRepository,
};
use four_to_score_audit::AuditEvent;
use four_to_score_domain::{ScoringEvent, StatusOverride, Submission};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_picks_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Checks that the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn health_check(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::ping(&mut self.conn)
    }

    /// Counts every stored submission for a gameweek, superseded ones
    /// included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_submissions(&mut self, gameweek: u32) -> Result<i64, PersistenceError> {
        queries::count_submissions(&mut self.conn, gameweek)
    }
}

impl Repository for Persistence {
    type Error = PersistenceError;
}

impl SubmissionRepository for Persistence {
    fn append_submission(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        mutations::append_submission(&mut self.conn, submission).map(|_| ())
    }

    fn list_submissions(&mut self, gameweek: u32) -> Result<Vec<Submission>, Self::Error> {
        queries::list_submissions(&mut self.conn, gameweek)
    }
}

impl ScoringEventRepository for Persistence {
    fn upsert_scoring_event(&mut self, event: &ScoringEvent) -> Result<(), Self::Error> {
        mutations::upsert_scoring_event(&mut self.conn, event)
    }

    fn find_scoring_event(
        &mut self,
        gameweek: u32,
        player_key: &str,
    ) -> Result<Option<ScoringEvent>, Self::Error> {
        queries::find_scoring_event(&mut self.conn, gameweek, player_key)
    }

    fn list_scoring_events(&mut self, gameweek: u32) -> Result<Vec<ScoringEvent>, Self::Error> {
        queries::list_scoring_events(&mut self.conn, gameweek)
    }
}

impl OverrideRepository for Persistence {
    fn append_override(&mut self, record: &StatusOverride) -> Result<(), Self::Error> {
        mutations::append_override(&mut self.conn, record).map(|_| ())
    }

    fn list_overrides(&mut self, gameweek: u32) -> Result<Vec<StatusOverride>, Self::Error> {
        queries::list_overrides(&mut self.conn, gameweek)
    }
}

impl AuditRepository for Persistence {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error> {
        mutations::persist_audit_event(&mut self.conn, event).map(|_| ())
    }

    fn list_audit_events(&mut self, gameweek: u32) -> Result<Vec<AuditEvent>, Self::Error> {
        queries::list_audit_events(&mut self.conn, gameweek)
    }
}
