// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use chrono::{DateTime, Utc};

/// Actor type recorded for administrator commands.
pub const ADMIN_ACTOR: &str = "admin";

/// Actor type recorded for participants sending picks.
pub const PARTICIPANT_ACTOR: &str = "participant";

/// Represents the entity performing an action.
///
/// Admin commands arrive over chat, so an admin actor is identified by the
/// chat handle the message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., `"admin"`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// An administrator identified by chat handle.
    #[must_use]
    pub fn admin(handle: &str) -> Self {
        Self::new(handle.to_string(), ADMIN_ACTOR.to_string())
    }

    /// A participant identified by chat handle.
    #[must_use]
    pub fn participant(handle: &str) -> Self {
        Self::new(handle.to_string(), PARTICIPANT_ACTOR.to_string())
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., inbound message ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`RecordScore`", "`Eliminate`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The affected record rendered as text, before or after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot used when the record did not exist before the change.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(String::from("none"))
    }
}

/// An immutable record of an administrator change.
///
/// Every recorded score and every applied override produces exactly one
/// audit event capturing who did what to which gameweek, with the state
/// before and after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Gameweek the change applies to.
    pub gameweek: u32,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// When the change was made.
    pub created_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `gameweek` - The gameweek the change applies to
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `created_at` - When the change was made
    #[must_use]
    pub const fn new(
        gameweek: u32,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            gameweek,
            actor,
            cause,
            action,
            before,
            after,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_time() -> DateTime<Utc> {
        Utc.timestamp_opt(1_755_259_200, 0).single().unwrap_or_default()
    }

    #[test]
    fn test_admin_actor() {
        let actor: Actor = Actor::admin("whatsapp:+447700900000");

        assert_eq!(actor.id, "whatsapp:+447700900000");
        assert_eq!(actor.actor_type, ADMIN_ACTOR);
    }

    #[test]
    fn test_participant_actor() {
        let actor: Actor = Actor::participant("whatsapp:+447700900001");

        assert_eq!(actor.id, "whatsapp:+447700900001");
        assert_eq!(actor.actor_type, PARTICIPANT_ACTOR);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("RecordScore"),
            Some(String::from("Haaland scored")),
        );

        assert_eq!(action.name, "RecordScore");
        assert_eq!(action.details, Some(String::from("Haaland scored")));
    }

    #[test]
    fn test_absent_snapshot() {
        assert_eq!(StateSnapshot::absent().data, "none");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::admin("whatsapp:+447700900000");
        let cause: Cause = Cause::new(String::from("SM123"), String::from("Admin message"));
        let action: Action = Action::new(String::from("Eliminate"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("pending"));
        let after: StateSnapshot = StateSnapshot::new(String::from("lost"));

        let event: AuditEvent = AuditEvent::new(
            4,
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            create_test_time(),
        );

        assert_eq!(event.gameweek, 4);
        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.created_at, create_test_time());
    }

    #[test]
    fn test_audit_event_equality() {
        let build = |gameweek: u32| {
            AuditEvent::new(
                gameweek,
                Actor::admin("admin"),
                Cause::new(String::from("SM1"), String::from("Admin message")),
                Action::new(String::from("Reinstate"), None),
                StateSnapshot::new(String::from("lost")),
                StateSnapshot::new(String::from("pending")),
                create_test_time(),
            )
        };

        assert_eq!(build(1), build(1));
        assert_ne!(build(1), build(2));
    }
}
