// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every list query returns rows in insertion order, which is the storage
//! order the status engine relies on to break timestamp ties.

pub mod audit;
pub mod game;

pub use audit::list_audit_events;
pub use game::{
    count_submissions, find_scoring_event, list_overrides, list_scoring_events,
    list_submissions,
};
