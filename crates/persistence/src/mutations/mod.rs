// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `game`: submissions, scoring events and overrides
//! - `audit`: the audit trail

pub mod audit;
pub mod game;

pub use audit::persist_audit_event;
pub use game::{append_override, append_submission, upsert_scoring_event};
