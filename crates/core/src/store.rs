// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage capabilities.
//!
//! Each record type sits behind its own small repository trait so the
//! status engine never depends on a particular store. All repositories of
//! one store share a single error type.

use crate::status::PeriodRecords;
use four_to_score_audit::AuditEvent;
use four_to_score_domain::{ScoringEvent, StatusOverride, Submission};
use std::convert::Infallible;

/// Common error type for a store's repositories.
pub trait Repository {
    /// Error returned by every operation of the store.
    type Error: std::error::Error;
}

/// Append-only log of submissions.
pub trait SubmissionRepository: Repository {
    /// Appends a submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn append_submission(&mut self, submission: &Submission) -> Result<(), Self::Error>;

    /// Lists every submission for a gameweek in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_submissions(&mut self, gameweek: u32) -> Result<Vec<Submission>, Self::Error>;
}

/// Scoring events keyed by gameweek and canonical player.
pub trait ScoringEventRepository: Repository {
    /// Inserts the event or replaces the one with the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn upsert_scoring_event(&mut self, event: &ScoringEvent) -> Result<(), Self::Error>;

    /// Looks up the event for one player.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_scoring_event(
        &mut self,
        gameweek: u32,
        player_key: &str,
    ) -> Result<Option<ScoringEvent>, Self::Error>;

    /// Lists every event for a gameweek.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_scoring_events(&mut self, gameweek: u32) -> Result<Vec<ScoringEvent>, Self::Error>;
}

/// Append-only log of manual overrides.
pub trait OverrideRepository: Repository {
    /// Appends an override.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn append_override(&mut self, record: &StatusOverride) -> Result<(), Self::Error>;

    /// Lists every override for a gameweek in storage order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_overrides(&mut self, gameweek: u32) -> Result<Vec<StatusOverride>, Self::Error>;
}

/// Append-only audit trail.
pub trait AuditRepository: Repository {
    /// Appends an audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error>;

    /// Lists audit events for a gameweek, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_audit_events(&mut self, gameweek: u32) -> Result<Vec<AuditEvent>, Self::Error>;
}

/// A store providing every repository.
pub trait GameStore:
    SubmissionRepository + ScoringEventRepository + OverrideRepository + AuditRepository
{
}

impl<T> GameStore for T where
    T: SubmissionRepository + ScoringEventRepository + OverrideRepository + AuditRepository
{
}

/// Loads everything recorded for a gameweek.
///
/// # Errors
///
/// Returns an error if any repository cannot be read.
pub fn load_period_records<S: GameStore>(
    store: &mut S,
    gameweek: u32,
) -> Result<PeriodRecords, S::Error> {
    Ok(PeriodRecords {
        submissions: store.list_submissions(gameweek)?,
        scoring_events: store.list_scoring_events(gameweek)?,
        overrides: store.list_overrides(gameweek)?,
    })
}

/// A store kept in process memory.
///
/// Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    submissions: Vec<Submission>,
    scoring_events: Vec<ScoringEvent>,
    overrides: Vec<StatusOverride>,
    audit_events: Vec<AuditEvent>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryStore {
    type Error = Infallible;
}

impl SubmissionRepository for MemoryStore {
    fn append_submission(&mut self, submission: &Submission) -> Result<(), Self::Error> {
        self.submissions.push(submission.clone());
        Ok(())
    }

    fn list_submissions(&mut self, gameweek: u32) -> Result<Vec<Submission>, Self::Error> {
        Ok(self
            .submissions
            .iter()
            .filter(|submission| submission.gameweek == gameweek)
            .cloned()
            .collect())
    }
}

impl ScoringEventRepository for MemoryStore {
    fn upsert_scoring_event(&mut self, event: &ScoringEvent) -> Result<(), Self::Error> {
        match self.scoring_events.iter_mut().find(|existing| {
            existing.gameweek == event.gameweek && existing.player_key == event.player_key
        }) {
            Some(existing) => *existing = event.clone(),
            None => self.scoring_events.push(event.clone()),
        }
        Ok(())
    }

    fn find_scoring_event(
        &mut self,
        gameweek: u32,
        player_key: &str,
    ) -> Result<Option<ScoringEvent>, Self::Error> {
        Ok(self
            .scoring_events
            .iter()
            .find(|event| event.gameweek == gameweek && event.player_key == player_key)
            .cloned())
    }

    fn list_scoring_events(&mut self, gameweek: u32) -> Result<Vec<ScoringEvent>, Self::Error> {
        Ok(self
            .scoring_events
            .iter()
            .filter(|event| event.gameweek == gameweek)
            .cloned()
            .collect())
    }
}

impl OverrideRepository for MemoryStore {
    fn append_override(&mut self, record: &StatusOverride) -> Result<(), Self::Error> {
        self.overrides.push(record.clone());
        Ok(())
    }

    fn list_overrides(&mut self, gameweek: u32) -> Result<Vec<StatusOverride>, Self::Error> {
        Ok(self
            .overrides
            .iter()
            .filter(|record| record.gameweek == gameweek)
            .cloned()
            .collect())
    }
}

impl AuditRepository for MemoryStore {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error> {
        self.audit_events.push(event.clone());
        Ok(())
    }

    fn list_audit_events(&mut self, gameweek: u32) -> Result<Vec<AuditEvent>, Self::Error> {
        Ok(self
            .audit_events
            .iter()
            .filter(|event| event.gameweek == gameweek)
            .cloned()
            .collect())
    }
}
