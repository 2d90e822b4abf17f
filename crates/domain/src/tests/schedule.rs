// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ActivePeriod, PeriodDefinition, Schedule, SummaryJob};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn definition(
    gameweek: u32,
    starts: NaiveDateTime,
    deadline: NaiveDateTime,
    closes: NaiveDateTime,
) -> PeriodDefinition {
    PeriodDefinition {
        gameweek,
        starts,
        opens: None,
        deadline,
        closes,
    }
}

fn create_test_definitions() -> Vec<PeriodDefinition> {
    vec![
        definition(
            1,
            local(2025, 8, 15, 19, 0),
            local(2025, 8, 15, 18, 30),
            local(2025, 8, 18, 22, 0),
        ),
        definition(
            2,
            local(2025, 8, 22, 19, 0),
            local(2025, 8, 22, 18, 30),
            local(2025, 8, 25, 22, 0),
        ),
        PeriodDefinition {
            gameweek: 3,
            starts: local(2025, 8, 30, 12, 30),
            opens: Some(local(2025, 8, 28, 0, 0)),
            deadline: local(2025, 8, 30, 11, 0),
            closes: local(2025, 9, 1, 22, 0),
        },
    ]
}

fn create_test_schedule() -> Schedule {
    Schedule::new("Europe/London", &create_test_definitions()).unwrap()
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert!(Schedule::new("Mars/Olympus_Mons", &create_test_definitions()).is_err());
}

#[test]
fn test_pre_season_returns_first_gameweek() {
    let schedule: Schedule = create_test_schedule();
    let active: ActivePeriod = schedule.current_period(utc(2025, 8, 1, 12, 0)).unwrap();

    assert_eq!(active.gameweek, 1);
    assert_eq!(active.deadline.with_timezone(&Utc), utc(2025, 8, 15, 17, 30));
}

#[test]
fn test_opening_grace_week_is_inside_first_window() {
    let schedule: Schedule = create_test_schedule();
    let active: ActivePeriod = schedule.current_period(utc(2025, 8, 10, 12, 0)).unwrap();

    assert_eq!(active.gameweek, 1);
}

#[test]
fn test_gameweek_stays_current_after_deadline_until_window_closes() {
    let schedule: Schedule = create_test_schedule();
    let now: DateTime<Utc> = utc(2025, 8, 16, 12, 0);

    assert_eq!(schedule.current_period(now).unwrap().gameweek, 1);
    assert!(schedule.deadline_passed(1, now));
}

#[test]
fn test_next_window_opens_when_previous_closes() {
    let schedule: Schedule = create_test_schedule();

    assert_eq!(
        schedule.current_period(utc(2025, 8, 18, 20, 59)).unwrap().gameweek,
        1
    );
    assert_eq!(
        schedule.current_period(utc(2025, 8, 19, 12, 0)).unwrap().gameweek,
        2
    );
}

#[test]
fn test_gap_between_windows_falls_back_to_next_deadline() {
    let schedule: Schedule = create_test_schedule();
    let active: ActivePeriod = schedule.current_period(utc(2025, 8, 27, 12, 0)).unwrap();

    assert_eq!(active.gameweek, 3);
}

#[test]
fn test_after_season_has_no_current_period() {
    let schedule: Schedule = create_test_schedule();

    assert!(schedule.current_period(utc(2025, 9, 10, 12, 0)).is_none());
}

#[test]
fn test_deadline_boundary_is_inclusive() {
    let schedule: Schedule = create_test_schedule();
    let deadline: DateTime<Utc> = utc(2025, 8, 15, 17, 30);

    assert!(!schedule.deadline_passed(1, deadline));
    assert!(schedule.deadline_passed(1, deadline + chrono::Duration::seconds(1)));
    assert!(!schedule.deadline_passed(1, deadline - chrono::Duration::hours(1)));
}

#[test]
fn test_unknown_gameweek_is_closed() {
    let schedule: Schedule = create_test_schedule();

    assert!(schedule.deadline_passed(38, utc(2025, 8, 1, 0, 0)));
    assert!(schedule.deadline_for(38).is_none());
}

#[test]
fn test_duplicate_gameweek_uses_latest_deadline() {
    let mut definitions: Vec<PeriodDefinition> = create_test_definitions();
    definitions.truncate(2);
    definitions.push(definition(
        2,
        local(2025, 9, 5, 19, 0),
        local(2025, 9, 5, 18, 30),
        local(2025, 9, 8, 22, 0),
    ));
    let schedule: Schedule = Schedule::new("Europe/London", &definitions).unwrap();
    let after_first_deadline: DateTime<Utc> = utc(2025, 8, 23, 12, 0);

    assert_eq!(
        schedule.deadline_for(2).unwrap().with_timezone(&Utc),
        utc(2025, 9, 5, 17, 30)
    );
    assert!(!schedule.deadline_passed(2, after_first_deadline));

    let active: ActivePeriod = schedule.current_period(after_first_deadline).unwrap();
    assert_eq!(active.gameweek, 2);
    assert_eq!(active.deadline.with_timezone(&Utc), utc(2025, 9, 5, 17, 30));
}

#[test]
fn test_format_deadline_uses_schedule_timezone() {
    let schedule: Schedule = create_test_schedule();

    assert_eq!(
        schedule.format_deadline(&utc(2025, 8, 15, 17, 30)),
        "Friday 15 August at 18:30"
    );
}

#[test]
fn test_summary_jobs_only_cover_future_deadlines() {
    let schedule: Schedule = create_test_schedule();
    let jobs: Vec<SummaryJob> = schedule.summary_jobs(utc(2025, 8, 20, 0, 0));

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].gameweek, 2);
    assert_eq!(jobs[0].fire_at, utc(2025, 8, 22, 17, 31));
    assert_eq!(jobs[0].job_id(), "gw_2_summary");
    assert_eq!(jobs[1].gameweek, 3);
    assert_eq!(jobs[1].fire_at, utc(2025, 8, 30, 10, 1));
}
