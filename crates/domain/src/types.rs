// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::names::canonical_player_name;
use crate::outcome::OverrideKind;
use crate::picks::PICKS_PER_SUBMISSION;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person taking part in the game.
///
/// The handle is the opaque contact address the chat provider reports
/// (a phone number for WhatsApp). The display name is only for humans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    handle: String,
    display_name: String,
}

impl Participant {
    /// Creates a new participant.
    ///
    /// An empty display name falls back to the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty.
    pub fn new(handle: &str, display_name: &str) -> Result<Self, DomainError> {
        let handle: &str = handle.trim();
        if handle.is_empty() {
            return Err(DomainError::EmptyParticipantHandle);
        }
        let display_name: &str = match display_name.trim() {
            "" => handle,
            name => name,
        };

        Ok(Self {
            handle: handle.to_string(),
            display_name: display_name.to_string(),
        })
    }

    /// Returns the contact handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns true if `target` is this participant's handle exactly.
    #[must_use]
    pub fn handle_matches(&self, target: &str) -> bool {
        self.handle == target.trim()
    }

    /// Returns true if `target` equals the display name, ignoring case.
    #[must_use]
    pub fn name_matches(&self, target: &str) -> bool {
        self.display_name.to_lowercase() == target.trim().to_lowercase()
    }
}

/// One participant's picks for one gameweek.
///
/// Submissions are append-only; a participant's effective picks are the
/// latest submission for the gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Handle of the submitter.
    pub submitter: String,
    /// Display name of the submitter when the picks were made.
    pub display_name: String,
    /// Gameweek the picks are for.
    pub gameweek: u32,
    /// Exactly four player names, in the order they were sent.
    pub players: Vec<String>,
    /// When the picks were received.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Creates a submission, enforcing the four-pick rule.
    ///
    /// # Errors
    ///
    /// Returns an error if `players` does not hold exactly four names.
    pub fn new(
        participant: &Participant,
        gameweek: u32,
        players: Vec<String>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if gameweek == 0 {
            return Err(DomainError::InvalidGameweek(gameweek));
        }
        if players.len() != PICKS_PER_SUBMISSION {
            return Err(DomainError::InvalidPickCount {
                expected: PICKS_PER_SUBMISSION,
                found: players.len(),
            });
        }

        Ok(Self {
            submitter: participant.handle().to_string(),
            display_name: participant.display_name().to_string(),
            gameweek,
            players,
            submitted_at,
        })
    }
}

/// Whether a player scored in a gameweek.
///
/// Keyed by `(gameweek, player_key)`; a later event for the same key
/// replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    /// Gameweek the result belongs to.
    pub gameweek: u32,
    /// Canonical lookup key (see [`canonical_player_name`]).
    pub player_key: String,
    /// The player name as the admin typed it.
    pub player_display: String,
    /// Whether the player scored.
    pub scored: bool,
    /// When the result was last recorded.
    pub updated_at: DateTime<Utc>,
}

impl ScoringEvent {
    /// Creates a scoring event from admin-supplied text.
    ///
    /// # Errors
    ///
    /// Returns an error if the player name is empty.
    pub fn new(
        gameweek: u32,
        player: &str,
        scored: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let player: &str = player.trim();
        if player.is_empty() {
            return Err(DomainError::EmptyPlayerName);
        }

        Ok(Self {
            gameweek,
            player_key: canonical_player_name(player),
            player_display: player.to_string(),
            scored,
            updated_at,
        })
    }
}

/// A manual elimination or reinstatement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOverride {
    /// Gameweek the override applies to.
    pub gameweek: u32,
    /// Handle of the participant affected.
    pub participant: String,
    /// What the admin did.
    pub kind: OverrideKind,
    /// Handle of the admin.
    pub actor: String,
    /// When the override was made.
    pub created_at: DateTime<Utc>,
}
