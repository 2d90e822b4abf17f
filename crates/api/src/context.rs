// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use four_to_score_audit::Cause;
use four_to_score_domain::{DomainError, Participant, PlayerCorrections, Schedule};

/// Static configuration every handler needs.
///
/// Built once at start-up and shared read-only.
#[derive(Debug, Clone)]
pub struct GameContext {
    /// The season schedule.
    pub schedule: Schedule,
    /// Known participants.
    pub roster: Vec<Participant>,
    /// Handles allowed to run admin commands.
    pub admins: Vec<String>,
    /// Player name spelling corrections.
    pub corrections: PlayerCorrections,
}

impl GameContext {
    /// Creates a new context.
    #[must_use]
    pub const fn new(
        schedule: Schedule,
        roster: Vec<Participant>,
        admins: Vec<String>,
        corrections: PlayerCorrections,
    ) -> Self {
        Self {
            schedule,
            roster,
            admins,
            corrections,
        }
    }

    /// Returns true if `handle` belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self, handle: &str) -> bool {
        let handle: &str = handle.trim();
        self.admins.iter().any(|admin| admin == handle)
    }

    /// Returns the roster entry for `handle`, or an unrostered participant
    /// known only by the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty.
    pub fn participant_for(&self, handle: &str) -> Result<Participant, DomainError> {
        self.roster
            .iter()
            .find(|participant| participant.handle_matches(handle))
            .map_or_else(|| Participant::new(handle, ""), |found| Ok(found.clone()))
    }

    /// Builds an inbound message, deciding admin rights from the sender.
    #[must_use]
    pub fn inbound(&self, sender: &str, body: &str, message_id: &str) -> InboundMessage {
        InboundMessage {
            sender: sender.trim().to_string(),
            body: body.to_string(),
            is_admin: self.is_admin(sender),
            message_id: message_id.to_string(),
        }
    }
}

/// A chat message received from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender handle.
    pub sender: String,
    /// Message body as received.
    pub body: String,
    /// Whether the sender may run admin commands.
    pub is_admin: bool,
    /// Provider message identifier, used as the audit cause.
    pub message_id: String,
}

impl InboundMessage {
    /// The audit cause for changes this message triggers.
    #[must_use]
    pub fn cause(&self) -> Cause {
        Cause::new(
            self.message_id.clone(),
            format!("Chat message from {}", self.sender),
        )
    }
}
