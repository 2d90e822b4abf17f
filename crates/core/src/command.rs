// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin command classification.
//!
//! The router only decides what the text asks for. It never touches the
//! store and never fails on unrecognised input: text that is not a command
//! falls through to pick parsing.

use crate::error::CoreError;

/// An administrator request, as data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record whether a player scored in the current gameweek.
    RecordScore {
        /// Player name with the admin's original casing.
        player: String,
        /// Whether the player scored.
        scored: bool,
    },
    /// Force a participant out of the current gameweek.
    Eliminate {
        /// Display name or handle of the participant.
        target: String,
    },
    /// Put a participant back in the running.
    Reinstate {
        /// Display name or handle of the participant.
        target: String,
    },
    /// Show the admin command list.
    Help,
    /// List players with a recorded result.
    ShowScorers,
    /// Show every participant's status.
    ShowStatus,
    /// Send the full picks summary to the admins.
    SendSummary,
}

impl Command {
    /// Returns true if the command changes stored state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::RecordScore { .. } | Self::Eliminate { .. } | Self::Reinstate { .. }
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum TargetedKind {
    Score(bool),
    Eliminate,
    Reinstate,
}

// "no goal" must be tried before "goal".
const TARGETED_KEYWORDS: &[(&str, TargetedKind)] = &[
    ("no goal", TargetedKind::Score(false)),
    ("goal", TargetedKind::Score(true)),
    ("1", TargetedKind::Score(true)),
    ("0", TargetedKind::Score(false)),
    ("eliminate", TargetedKind::Eliminate),
    ("reinstate", TargetedKind::Reinstate),
];

const HELP_KEYWORDS: &[&str] = &["help", "commands"];
const SCORER_KEYWORDS: &[&str] = &["show scorers", "scorers", "goals"];
const STATUS_KEYWORDS: &[&str] = &[
    "show active",
    "active",
    "whos in",
    "who is in",
    "status",
    "show status",
];
const SUMMARY_KEYWORDS: &[&str] = &["summary", "picks", "show picks", "show"];

/// Classifies administrator text.
///
/// Matching is case-insensitive on the trimmed text. Targeted commands
/// (`goal`, `no goal`, `1`, `0`, `eliminate`, `reinstate`) take the rest of
/// the line as the name, preserving its casing, and only match single-line
/// text. `Ok(None)` means the text is not a command.
///
/// # Errors
///
/// Returns `CoreError::MissingTarget` if a targeted keyword is sent on its
/// own.
pub fn route_admin_text(text: &str) -> Result<Option<Command>, CoreError> {
    let text: &str = text.trim();
    if text.is_empty() || text.contains(['\n', '\r']) {
        return Ok(None);
    }
    let lowered: String = text.to_ascii_lowercase();

    let fixed: Option<Command> = if HELP_KEYWORDS.contains(&lowered.as_str()) {
        Some(Command::Help)
    } else if SCORER_KEYWORDS.contains(&lowered.as_str()) {
        Some(Command::ShowScorers)
    } else if STATUS_KEYWORDS.contains(&lowered.as_str()) {
        Some(Command::ShowStatus)
    } else if SUMMARY_KEYWORDS.contains(&lowered.as_str()) {
        Some(Command::SendSummary)
    } else {
        None
    };
    if fixed.is_some() {
        return Ok(fixed);
    }

    for (keyword, kind) in TARGETED_KEYWORDS {
        if lowered == *keyword {
            return Err(CoreError::MissingTarget {
                command: (*keyword).to_string(),
            });
        }
        let Some(rest) = lowered.strip_prefix(keyword) else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        // ASCII lower-casing keeps byte offsets, so the name can be sliced
        // from the original text.
        let name: String = text[keyword.len()..].trim().to_string();
        return Ok(Some(match kind {
            TargetedKind::Score(scored) => Command::RecordScore {
                player: name,
                scored: *scored,
            },
            TargetedKind::Eliminate => Command::Eliminate { target: name },
            TargetedKind::Reinstate => Command::Reinstate { target: name },
        }));
    }

    Ok(None)
}
