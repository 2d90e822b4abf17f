// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chat message text.
//!
//! Everything the bot says is built here. Messages are plain text using
//! `WhatsApp` markup: `*bold*` for a pick that scored and `~struck~` for a
//! participant who is out. Emoji at the start of a line mark its kind.

use crate::error::ApiError;
use four_to_score::{
    ParticipantStatus, PeriodSummary, PickStatus, ScorerListing, StatusReport, StatusSource,
};
use four_to_score_domain::{OverrideKind, ParticipantOutcome, PickOutcome};

const HEADER_RULE_WIDTH: usize = 25;

const EXAMPLE_PICKS: &str = "Example:\nHaaland\nSalah\nSaka\nPalmer";

fn header(title: &str) -> String {
    format!("{title}\n{}\n\n", "=".repeat(HEADER_RULE_WIDTH))
}

/// Confirms saved picks to the submitter.
#[must_use]
pub fn submission_confirmation(
    gameweek: u32,
    display_name: &str,
    players: &[String],
    deadline: &str,
) -> String {
    format!(
        "✅ GW{gameweek} picks saved for {display_name}!\n🎯 {}\n⏰ Deadline: {deadline}",
        players.join(", ")
    )
}

/// Corrective prompt for a message that did not hold four names.
#[must_use]
pub fn wrong_pick_count(gameweek: u32, deadline: &str) -> String {
    format!(
        "❌ Please send exactly 4 player names for Gameweek {gameweek}\n\n{EXAMPLE_PICKS}\n\n⏰ Deadline: {deadline}"
    )
}

/// Instructions for participants.
#[must_use]
pub fn welcome(gameweek: u32, deadline: &str) -> String {
    format!(
        "⚽ Welcome to the 4 To Score Picks Bot ⚽\n\
         📝 To submit picks for Gameweek {gameweek}:\n\
         Send 4 player names, one per line:\n\n\
         {EXAMPLE_PICKS}\n\n\
         ⏰ Deadline: {deadline}\n\
         ✅ You can update picks by sending new ones"
    )
}

/// Reminder for a participant who has not sent picks yet.
#[must_use]
pub fn reminder(gameweek: u32, deadline: &str) -> String {
    format!(
        "⏰ Reminder: your picks for Gameweek {gameweek} are still missing!\n\
         Send 4 player names, one per line.\n\
         ⏰ Deadline: {deadline}"
    )
}

/// Admin command reference.
#[must_use]
pub fn admin_help() -> String {
    let mut text: String = header("🛠️ ADMIN COMMANDS");
    for (command, meaning) in [
        ("1 <player>", "player scored"),
        ("0 <player>", "player did not score"),
        ("goal / no goal <player>", "same as 1 / 0"),
        ("eliminate <name>", "knock someone out"),
        ("reinstate <name>", "put someone back in"),
        ("status", "who is still in"),
        ("scorers", "results recorded so far"),
        ("picks", "send everyone's picks"),
        ("help", "this message"),
    ] {
        text.push_str(&format!("{command} - {meaning}\n"));
    }
    text
}

/// Reply to a participant who tried an admin command.
#[must_use]
pub fn admin_only() -> String {
    String::from("⛔ Only the admin can use that command.")
}

/// Acknowledges a summary request.
#[must_use]
pub fn summary_requested(gameweek: u32) -> String {
    format!("📊 Sending Gameweek {gameweek} summary...")
}

/// Acknowledges a recorded scoring result.
#[must_use]
pub fn scoring_ack(gameweek: u32, player: &str, scored: bool) -> String {
    if scored {
        format!("✅ {player}: GOAL! ⚽ (GW{gameweek})")
    } else {
        format!("✅ {player}: No goal (GW{gameweek})")
    }
}

/// Acknowledges an eliminate or reinstate command.
#[must_use]
pub fn override_ack(gameweek: u32, display_name: &str, kind: OverrideKind, changed: bool) -> String {
    match (kind, changed) {
        (OverrideKind::Eliminate, true) => {
            format!("👎 {display_name} eliminated for GW{gameweek}")
        }
        (OverrideKind::Reinstate, true) => {
            format!("✅ {display_name} reinstated for GW{gameweek}")
        }
        (OverrideKind::Eliminate, false) => {
            format!("ℹ️ {display_name} is already out for GW{gameweek}. Nothing changed.")
        }
        (OverrideKind::Reinstate, false) => {
            format!("ℹ️ {display_name} is still in for GW{gameweek}. Nothing changed.")
        }
    }
}

/// Reply to an override on someone who never submitted picks.
#[must_use]
pub fn no_picks_ack(gameweek: u32, display_name: &str) -> String {
    format!("ℹ️ {display_name} has no picks for GW{gameweek}, so they stay out. Nothing changed.")
}

/// Everyone's effective picks, sent to the admins.
#[must_use]
pub fn period_summary(summary: &PeriodSummary) -> String {
    let mut text: String = header(&format!("📊 GAMEWEEK {} FINAL PICKS", summary.gameweek));

    for entry in &summary.entries {
        text.push_str(&format!(
            "✅ {}: {}\n",
            entry.participant.display_name(),
            entry.players.join(", ")
        ));
    }

    if !summary.missing.is_empty() {
        text.push_str("\n❌ NO PICKS SUBMITTED:\n");
        for participant in &summary.missing {
            text.push_str(&format!("  • {}\n", participant.display_name()));
        }
    }

    text
}

/// Everyone's status, sorted by name.
///
/// Winners get 🏆, those still in get ✅ and those out are struck through.
#[must_use]
pub fn status_report(report: &StatusReport) -> String {
    let mut text: String = header(&format!("🎯 GAMEWEEK {} STATUS", report.gameweek));

    for status in &report.participants {
        text.push_str(&status_line(status));
        text.push('\n');
    }

    text.push_str(&format!(
        "\n🏆 Won: {}  ✅ Still in: {}  👎 Out: {}",
        report.count(ParticipantOutcome::Won),
        report.count(ParticipantOutcome::Pending),
        report.count(ParticipantOutcome::Lost)
    ));
    text
}

fn status_line(status: &ParticipantStatus) -> String {
    let picks: String = if status.has_submission() {
        status
            .picks
            .iter()
            .map(render_pick)
            .collect::<Vec<String>>()
            .join(", ")
    } else {
        String::from("No picks submitted")
    };
    let name: &str = status.participant.display_name();

    let line: String = match status.outcome {
        ParticipantOutcome::Won => format!("🏆 {name}: {picks}"),
        ParticipantOutcome::Pending => format!("✅ {name}: {picks}"),
        ParticipantOutcome::Lost => format!("👎 ~{name}: {picks}~"),
    };

    match status.source {
        StatusSource::Computed => line,
        StatusSource::Override(OverrideKind::Eliminate) => format!("{line} (eliminated)"),
        StatusSource::Override(OverrideKind::Reinstate) => format!("{line} (reinstated)"),
    }
}

fn render_pick(pick: &PickStatus) -> String {
    match pick.outcome {
        PickOutcome::Scored => format!("*{}*", pick.player),
        PickOutcome::DidNotScore => pick.player.clone(),
        PickOutcome::Unknown => format!("{} ⏳", pick.player),
    }
}

/// Players with a recorded result.
#[must_use]
pub fn scorer_listing(listing: &ScorerListing) -> String {
    if listing.is_empty() {
        return format!(
            "📭 No scoring results recorded for Gameweek {} yet.",
            listing.gameweek
        );
    }

    let mut text: String = header(&format!("⚽ GAMEWEEK {} SCORERS", listing.gameweek));
    text.push_str(&format!("⚽ Scored: {}\n", names_or_none(&listing.scored)));
    text.push_str(&format!("❌ No goal: {}", names_or_none(&listing.not_scored)));
    text
}

fn names_or_none(names: &[String]) -> String {
    if names.is_empty() {
        String::from("none")
    } else {
        names.join(", ")
    }
}

/// The chat reply for a failed operation.
///
/// Store failures get a generic apology; everything else says what went
/// wrong.
#[must_use]
pub fn error_reply(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput { message, .. } => format!("❌ {message}"),
        ApiError::ResourceNotFound { message, .. } => format!("⚠️ {message}"),
        ApiError::AmbiguousTarget { target, candidates } => format!(
            "⚠️ '{target}' matches more than one person: {}. Send their number instead.",
            candidates.join(", ")
        ),
        ApiError::NoActivePeriod => String::from(
            "🚫 No active gameweek found. Please check back when the new season starts!",
        ),
        ApiError::DeadlinePassed { gameweek } => {
            format!("⏰ Sorry! The deadline for Gameweek {gameweek} has passed.")
        }
        ApiError::StoreUnavailable { .. } | ApiError::DeliveryFailed { .. } => {
            String::from("❌ Sorry, something went wrong. Please try again.")
        }
    }
}
