// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack::CoreError;
use caretrack_domain::{DomainError, EntryId, RuleId, RuleViolation};
use caretrack_persistence::PersistenceError;

use crate::{ApiError, translate_core_error, translate_domain_error};

#[test]
fn test_schedule_violations_keep_every_message() {
    let err = translate_core_error(CoreError::ScheduleViolations {
        violations: vec![
            RuleViolation::error(RuleId::WeeklyHourLimit, String::from("too many hours")),
            RuleViolation::error(RuleId::InsufficientRest, String::from("too little rest")),
        ],
        warnings: Vec::new(),
    });

    let ApiError::ScheduleViolation { ref violations, .. } = err else {
        panic!("expected schedule violation");
    };
    assert_eq!(violations.len(), 2);
    assert_eq!(
        err.to_string(),
        "Schedule rule violation: too many hours; too little rest"
    );
}

#[test]
fn test_missing_entry_is_not_found() {
    let err = translate_core_error(CoreError::EntryNotFound(EntryId::new(5)));
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    let err = ApiError::from(PersistenceError::EntryNotFound(5));
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_storage_failures_are_internal() {
    let err = ApiError::from(PersistenceError::QueryFailed(String::from("disk full")));
    assert!(matches!(err, ApiError::Internal { .. }));
}

#[test]
fn test_identifier_errors_name_their_field() {
    let err = translate_domain_error(DomainError::InvalidIdentifier {
        field: "carer_id",
        value: -1,
    });

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("carer_id"),
            message: String::from("Invalid carer_id: -1. Must be greater than 0"),
        }
    );
}
