// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod error;
mod status;
mod store;

#[cfg(test)]
mod tests;

pub use apply::{OverrideResult, ScoringResult, apply_override, apply_scoring, resolve_target};
pub use command::{Command, route_admin_text};
pub use error::CoreError;
pub use status::{
    ParticipantStatus, PeriodRecords, PeriodSummary, PickStatus, ScorerListing, StatusReport,
    StatusSource, SummaryEntry, compute_status_report, effective_override,
    effective_scoring_events, effective_submissions, known_participants, period_summary,
    scorer_listing,
};
pub use store::{
    AuditRepository, GameStore, MemoryStore, OverrideRepository, Repository,
    ScoringEventRepository, SubmissionRepository, load_period_records,
};
