// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use four_to_score::{
    ParticipantStatus, PeriodSummary, PickStatus, ScorerListing, StatusReport, StatusSource,
    SummaryEntry,
};
use four_to_score_domain::{OverrideKind, ParticipantOutcome, PickOutcome};

use crate::ApiError;
use crate::compose;
use crate::tests::helpers::{after_deadline, participant};

fn pick(player: &str, outcome: PickOutcome) -> PickStatus {
    PickStatus {
        player: player.to_string(),
        outcome,
    }
}

fn status(
    name: &str,
    picks: Vec<PickStatus>,
    outcome: ParticipantOutcome,
    source: StatusSource,
) -> ParticipantStatus {
    ParticipantStatus {
        participant: participant(&format!("whatsapp:{name}"), name),
        picks,
        outcome,
        source,
    }
}

fn create_test_report() -> StatusReport {
    StatusReport {
        gameweek: 3,
        participants: vec![
            status(
                "Aaron",
                vec![
                    pick("Haaland", PickOutcome::Scored),
                    pick("Salah", PickOutcome::Scored),
                    pick("Saka", PickOutcome::Scored),
                    pick("Palmer", PickOutcome::Scored),
                ],
                ParticipantOutcome::Won,
                StatusSource::Computed,
            ),
            status(
                "Ben",
                vec![
                    pick("Isak", PickOutcome::Scored),
                    pick("Watkins", PickOutcome::DidNotScore),
                    pick("Son", PickOutcome::Unknown),
                    pick("Gordon", PickOutcome::Unknown),
                ],
                ParticipantOutcome::Lost,
                StatusSource::Computed,
            ),
            status(
                "Calum",
                vec![
                    pick("Isak", PickOutcome::Scored),
                    pick("Mbeumo", PickOutcome::Unknown),
                    pick("Son", PickOutcome::Unknown),
                    pick("Gordon", PickOutcome::Unknown),
                ],
                ParticipantOutcome::Pending,
                StatusSource::Computed,
            ),
            status(
                "Dom",
                Vec::new(),
                ParticipantOutcome::Lost,
                StatusSource::Computed,
            ),
            status(
                "Joss",
                vec![
                    pick("Isak", PickOutcome::Scored),
                    pick("Mbeumo", PickOutcome::Unknown),
                    pick("Son", PickOutcome::Unknown),
                    pick("Gordon", PickOutcome::Unknown),
                ],
                ParticipantOutcome::Lost,
                StatusSource::Override(OverrideKind::Eliminate),
            ),
        ],
        computed_at: after_deadline(0),
    }
}

#[test]
fn test_status_report_marks_each_outcome() {
    let text: String = compose::status_report(&create_test_report());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "🎯 GAMEWEEK 3 STATUS");
    assert_eq!(lines[1], "=========================");
    assert_eq!(lines[3], "🏆 Aaron: *Haaland*, *Salah*, *Saka*, *Palmer*");
    assert_eq!(lines[4], "👎 ~Ben: *Isak*, Watkins, Son ⏳, Gordon ⏳~");
    assert_eq!(lines[5], "✅ Calum: *Isak*, Mbeumo ⏳, Son ⏳, Gordon ⏳");
    assert_eq!(lines[6], "👎 ~Dom: No picks submitted~");
    assert_eq!(
        lines[7],
        "👎 ~Joss: *Isak*, Mbeumo ⏳, Son ⏳, Gordon ⏳~ (eliminated)"
    );
    assert!(text.ends_with("🏆 Won: 1  ✅ Still in: 1  👎 Out: 3"));
}

#[test]
fn test_period_summary_lists_missing_participants() {
    let summary: PeriodSummary = PeriodSummary {
        gameweek: 2,
        entries: vec![SummaryEntry {
            participant: participant("whatsapp:+1", "Aaron"),
            players: vec![
                String::from("Haaland"),
                String::from("Salah"),
                String::from("Saka"),
                String::from("Palmer"),
            ],
        }],
        missing: vec![participant("whatsapp:+2", "Ben")],
    };

    let text: String = compose::period_summary(&summary);

    assert!(text.starts_with("📊 GAMEWEEK 2 FINAL PICKS\n"));
    assert!(text.contains("✅ Aaron: Haaland, Salah, Saka, Palmer\n"));
    assert!(text.contains("❌ NO PICKS SUBMITTED:\n  • Ben\n"));
}

#[test]
fn test_period_summary_without_missing_section() {
    let summary: PeriodSummary = PeriodSummary {
        gameweek: 2,
        entries: Vec::new(),
        missing: Vec::new(),
    };

    assert!(!compose::period_summary(&summary).contains("NO PICKS SUBMITTED"));
}

#[test]
fn test_scorer_listing_text() {
    let listing: ScorerListing = ScorerListing {
        gameweek: 1,
        scored: vec![String::from("Haaland"), String::from("Saka")],
        not_scored: Vec::new(),
    };

    let text: String = compose::scorer_listing(&listing);

    assert_eq!(
        text,
        "⚽ GAMEWEEK 1 SCORERS\n=========================\n\n⚽ Scored: Haaland, Saka\n❌ No goal: none"
    );
}

#[test]
fn test_admin_help_lists_one_command_per_line() {
    let text: String = compose::admin_help();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "🛠️ ADMIN COMMANDS");
    assert_eq!(lines[3], "1 <player> - player scored");
    assert_eq!(lines.last(), Some(&"help - this message"));
    assert!(text.ends_with("help - this message\n"));
}

#[test]
fn test_no_picks_override_reply() {
    assert_eq!(
        compose::no_picks_ack(2, "Bob"),
        "ℹ️ Bob has no picks for GW2, so they stay out. Nothing changed."
    );
}

#[test]
fn test_empty_scorer_listing() {
    let listing: ScorerListing = ScorerListing {
        gameweek: 4,
        scored: Vec::new(),
        not_scored: Vec::new(),
    };

    assert_eq!(
        compose::scorer_listing(&listing),
        "📭 No scoring results recorded for Gameweek 4 yet."
    );
}

#[test]
fn test_store_failures_get_generic_apology() {
    let reply: String = compose::error_reply(&ApiError::StoreUnavailable {
        message: String::from("database is locked"),
    });

    assert_eq!(reply, "❌ Sorry, something went wrong. Please try again.");
    assert!(!reply.contains("locked"));
}

#[test]
fn test_scheduling_errors_are_distinct() {
    let closed: String = compose::error_reply(&ApiError::DeadlinePassed { gameweek: 5 });
    let none: String = compose::error_reply(&ApiError::NoActivePeriod);

    assert_eq!(closed, "⏰ Sorry! The deadline for Gameweek 5 has passed.");
    assert!(none.starts_with("🚫"));
    assert_ne!(closed, none);
}

#[test]
fn test_confirmation_text() {
    let players: Vec<String> = ["Haaland", "Salah", "Saka", "Palmer"]
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        compose::submission_confirmation(1, "Alice", &players, "Friday 15 August at 18:30"),
        "✅ GW1 picks saved for Alice!\n🎯 Haaland, Salah, Saka, Palmer\n⏰ Deadline: Friday 15 August at 18:30"
    );
}
