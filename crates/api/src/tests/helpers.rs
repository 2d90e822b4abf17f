// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use four_to_score::GameStore;
use four_to_score_audit::{Actor, Cause};
use four_to_score_domain::{Participant, PeriodDefinition, PlayerCorrections, Schedule};

use crate::{ApiError, GameContext, InboundMessage, InboundReply, handle_inbound_message};

pub const ADMIN: &str = "whatsapp:+447700900000";
pub const ALICE: &str = "whatsapp:+447700900001";
pub const BOB: &str = "whatsapp:+447700900002";
pub const CAROL: &str = "whatsapp:+447700900003";

/// Gameweek 1 deadline, 18:30 BST.
pub const DEADLINE_TEXT: &str = "Friday 15 August at 18:30";

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn create_test_schedule() -> Schedule {
    let definitions: Vec<PeriodDefinition> = vec![
        PeriodDefinition {
            gameweek: 1,
            starts: local(2025, 8, 15, 19, 0),
            opens: None,
            deadline: local(2025, 8, 15, 18, 30),
            closes: local(2025, 8, 18, 22, 0),
        },
        PeriodDefinition {
            gameweek: 2,
            starts: local(2025, 8, 22, 19, 0),
            opens: None,
            deadline: local(2025, 8, 22, 18, 30),
            closes: local(2025, 8, 25, 22, 0),
        },
    ];
    Schedule::new("Europe/London", &definitions).unwrap()
}

pub fn participant(handle: &str, name: &str) -> Participant {
    Participant::new(handle, name).unwrap()
}

pub fn create_test_context() -> GameContext {
    GameContext::new(
        create_test_schedule(),
        vec![
            participant(ALICE, "Alice"),
            participant(BOB, "Bob"),
            participant(CAROL, "Carol"),
        ],
        vec![String::from(ADMIN)],
        PlayerCorrections::default(),
    )
}

pub fn create_test_admin() -> Actor {
    Actor::admin(ADMIN)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("SM-test"), String::from("Admin message"))
}

/// The gameweek 1 deadline in UTC.
pub fn deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 17, 30, 0).unwrap()
}

pub fn before_deadline(minutes: i64) -> DateTime<Utc> {
    deadline() - Duration::minutes(minutes)
}

pub fn after_deadline(minutes: i64) -> DateTime<Utc> {
    deadline() + Duration::minutes(minutes)
}

pub fn message(context: &GameContext, sender: &str, body: &str) -> InboundMessage {
    context.inbound(sender, body, "SM-test")
}

pub fn send<S>(
    store: &mut S,
    context: &GameContext,
    sender: &str,
    body: &str,
    now: DateTime<Utc>,
) -> InboundReply
where
    S: GameStore,
    S::Error: Into<ApiError>,
{
    handle_inbound_message(store, context, &message(context, sender, body), now)
}

pub const ALICE_PICKS: &str = "Haaland\nSalah\nSaka\nPalmer";
