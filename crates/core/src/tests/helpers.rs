// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Duration, TimeZone, Utc};
use four_to_score_audit::{Actor, Cause};
use four_to_score_domain::{
    OverrideKind, Participant, ScoringEvent, StatusOverride, Submission,
};

pub const GAMEWEEK: u32 = 1;

pub fn create_test_actor() -> Actor {
    Actor::admin("whatsapp:+447700900000")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("SM-test"), String::from("Admin message"))
}

/// Friday of gameweek 1, before the deadline.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap()
}

pub fn at(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

pub fn participant(handle: &str, name: &str) -> Participant {
    Participant::new(handle, name).unwrap()
}

pub fn create_test_roster() -> Vec<Participant> {
    vec![
        participant("whatsapp:+447700900001", "Alice"),
        participant("whatsapp:+447700900002", "Bob"),
        participant("whatsapp:+447700900003", "Carol"),
    ]
}

pub fn submission(who: &Participant, players: [&str; 4], minutes: i64) -> Submission {
    Submission::new(
        who,
        GAMEWEEK,
        players.iter().map(ToString::to_string).collect(),
        at(minutes),
    )
    .unwrap()
}

pub fn scoring(player: &str, scored: bool, minutes: i64) -> ScoringEvent {
    ScoringEvent::new(GAMEWEEK, player, scored, at(minutes)).unwrap()
}

pub fn override_record(who: &Participant, kind: OverrideKind, minutes: i64) -> StatusOverride {
    StatusOverride {
        gameweek: GAMEWEEK,
        participant: who.handle().to_string(),
        kind,
        actor: create_test_actor().id,
        created_at: at(minutes),
    }
}
