// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event serialization and persistence.

use crate::tests::{create_test_actor, create_test_cause};
use crate::{Persistence, PersistenceError};
use caretrack_audit::{Action, AuditEvent, StateSnapshot};
use caretrack_domain::CarerId;

fn event(name: &str, carer: Option<i64>) -> AuditEvent {
    let event = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(name), Some(String::from("details"))),
        StateSnapshot::new(String::from("entries=0,hours=0")),
        StateSnapshot::new(String::from("entries=1,hours=12")),
    );
    match carer {
        Some(id) => event.for_carer(CarerId::new(id).unwrap()),
        None => event,
    }
}

#[test]
fn test_persist_and_reload_audit_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let original = event("CreateEntry", Some(3));
    let event_id = persistence.persist_audit_event(&original).unwrap();
    let loaded = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(loaded, original.with_event_id(event_id));
}

#[test]
fn test_unscoped_event_has_no_carer() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let event_id = persistence
        .persist_audit_event(&event("DeleteEntries", None))
        .unwrap();

    assert_eq!(persistence.get_audit_event(event_id).unwrap().carer_id, None);
}

#[test]
fn test_get_unknown_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result = persistence.get_audit_event(42);

    assert!(matches!(result, Err(PersistenceError::EventNotFound(42))));
}

#[test]
fn test_timeline_is_ordered_and_filterable() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.persist_audit_event(&event("A", Some(1))).unwrap();
    persistence.persist_audit_event(&event("B", Some(2))).unwrap();
    persistence.persist_audit_event(&event("C", None)).unwrap();
    persistence.persist_audit_event(&event("D", Some(1))).unwrap();

    let all: Vec<String> = persistence
        .audit_timeline(None)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(all, vec!["A", "B", "C", "D"]);

    let carer_one: Vec<String> = persistence
        .audit_timeline(Some(CarerId::new(1).unwrap()))
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(carer_one, vec!["A", "D"]);
}

#[test]
fn test_timeline_events_carry_ids() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first = persistence.persist_audit_event(&event("A", None)).unwrap();

    let timeline = persistence.audit_timeline(None).unwrap();

    assert_eq!(timeline[0].event_id, Some(first));
}
