// Copyright (C) 2026 CareTrack contributors
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

use caretrack_domain::CarerId;

/// The operator or process that changed the rota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "system", "scheduler").
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
}

/// Why the change was made (a request, a drag/drop, a bulk generation run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done to the rota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CreateEntry`", "`DeleteEntries`").
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

/// A textual snapshot of the affected rota entries.
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
}

/// An immutable record of one rota change.
///
/// Every successful rota write produces exactly one audit event, capturing:
/// - Who performed the change (actor)
/// - Why it was performed (cause)
/// - What was done (action)
/// - The affected entries before and after the change
///
/// `event_id` is `None` until the event has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The persisted identifier.
    pub event_id: Option<i64>,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The affected state before the change.
    pub before: StateSnapshot,
    /// The affected state after the change.
    pub after: StateSnapshot,
    /// The carer whose schedule changed, when exactly one carer is affected.
    pub carer_id: Option<CarerId>,
}

impl AuditEvent {
    /// Creates a new, unsaved `AuditEvent` that is not scoped to a carer.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the change
    /// * `after` - The state after the change
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            carer_id: None,
        }
    }

    /// Scopes the event to a single carer.
    #[must_use]
    pub const fn for_carer(mut self, carer_id: CarerId) -> Self {
        self.carer_id = Some(carer_id);
        self
    }

    /// Attaches the identifier assigned on persistence.
    #[must_use]
    pub const fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_event() -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-1"), String::from("Drag and drop")),
            Action::new(String::from("CreateEntry"), None),
            StateSnapshot::new(String::from("entries=0")),
            StateSnapshot::new(String::from("entries=1")),
        )
    }

    #[test]
    fn test_new_event_is_unsaved_and_unscoped() {
        let event: AuditEvent = sample_event();

        assert_eq!(event.event_id, None);
        assert_eq!(event.carer_id, None);
        assert_eq!(event.action.name, "CreateEntry");
        assert_eq!(event.before.data, "entries=0");
        assert_eq!(event.after.data, "entries=1");
    }

    #[test]
    fn test_event_scoping_and_id() {
        let carer: CarerId = CarerId::new(9).unwrap();
        let event: AuditEvent = sample_event().for_carer(carer).with_event_id(42);

        assert_eq!(event.carer_id, Some(carer));
        assert_eq!(event.event_id, Some(42));
    }

    #[test]
    fn test_action_details() {
        let action: Action = Action::new(
            String::from("DeleteEntries"),
            Some(String::from("3 entries")),
        );
        assert_eq!(action.details.as_deref(), Some("3 entries"));
    }

    #[test]
    fn test_event_equality() {
        assert_eq!(sample_event(), sample_event());
        assert_ne!(sample_event(), sample_event().with_event_id(1));
    }
}
