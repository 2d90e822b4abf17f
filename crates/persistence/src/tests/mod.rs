// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use chrono::{DateTime, Duration, TimeZone, Utc};
use four_to_score_audit::{Actor, Cause};
use four_to_score_domain::Participant;

pub fn create_test_actor() -> Actor {
    Actor::admin("whatsapp:+447700900000")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("SM-test"), String::from("Admin message"))
}

pub fn create_test_participant() -> Participant {
    Participant::new("whatsapp:+447700900001", "Alice").unwrap()
}

pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}
