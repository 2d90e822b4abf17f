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

mod error;
mod names;
mod outcome;
mod picks;
mod schedule;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use names::canonical_player_name;
pub use outcome::{OverrideKind, ParticipantOutcome, PickOutcome, aggregate_outcome};
pub use picks::{PICKS_PER_SUBMISSION, PlayerCorrections, parse_picks};
pub use schedule::{
    ActivePeriod, DEFAULT_TIMEZONE, Period, PeriodDefinition, SEASON_OPENING_GRACE_DAYS,
    SUMMARY_DELAY_MINUTES, Schedule, SummaryJob,
};
pub use types::{Participant, ScoringEvent, StatusOverride, Submission};
