// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{day_shift, stored};
use crate::{
    CarerId, DomainError, EntryId, PackageId, RuleId, RuleViolation, Severity, ShiftTime,
    ShiftType,
};

#[test]
fn test_identifiers_must_be_positive() {
    assert!(CarerId::new(1).is_ok());
    assert!(matches!(
        CarerId::new(0),
        Err(DomainError::InvalidIdentifier {
            field: "carer_id",
            value: 0
        })
    ));
    assert!(PackageId::new(-4).is_err());
}

#[test]
fn test_shift_type_parsing() {
    assert_eq!("DAY".parse::<ShiftType>().unwrap(), ShiftType::Day);
    assert_eq!("night".parse::<ShiftType>().unwrap(), ShiftType::Night);
    assert!("EVENING".parse::<ShiftType>().is_err());
    assert_eq!(ShiftType::Night.to_string(), "NIGHT");
}

#[test]
fn test_shift_time_parsing() {
    let time = ShiftTime::parse("07:30").unwrap();
    assert_eq!(time.minutes_since_midnight(), 450);
    assert_eq!(time.to_string(), "07:30");
    assert_eq!(ShiftTime::parse("7:05").unwrap().to_string(), "07:05");

    for bad in ["24:00", "12:60", "1230", "12:3", "ab:cd", ""] {
        assert!(ShiftTime::parse(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn test_same_entry_requires_matching_ids() {
    let unsaved = day_shift(1, "2026-03-02");
    assert!(!unsaved.is_same_entry(&unsaved));

    let a = stored(day_shift(1, "2026-03-02"), 7);
    let b = stored(day_shift(1, "2026-03-05"), 7);
    let c = stored(day_shift(1, "2026-03-02"), 8);
    assert!(a.is_same_entry(&b));
    assert!(!a.is_same_entry(&c));
    assert_eq!(a.id, Some(EntryId::new(7)));
}

#[test]
fn test_violation_wire_format() {
    let violation = RuleViolation::error(RuleId::ConsecutiveWeekends, String::from("x"));
    assert!(violation.is_blocking());

    let json = serde_json::to_value(&violation).unwrap();
    assert_eq!(json["rule"], "CONSECUTIVE_WEEKENDS");
    assert_eq!(json["severity"], "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
}
