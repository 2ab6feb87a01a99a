// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{day_shift, entry, night_shift};
use crate::{
    BatchOutcome, RuleId, RuleSet, RuleViolation, SchedulingRule, ShiftType, ValidationOutcome,
    RotaEntry, validate, validate_batch,
};

/// Warns on every candidate so warning routing can be observed.
struct AlwaysWarn;

impl SchedulingRule for AlwaysWarn {
    fn rule_id(&self) -> RuleId {
        RuleId::NoCompetentStaff
    }

    fn evaluate(&self, candidate: &RotaEntry, _entries: &[RotaEntry]) -> Vec<RuleViolation> {
        vec![RuleViolation::warning(
            self.rule_id(),
            format!("check staffing on {}", candidate.date),
        )]
    }
}

#[test]
fn test_validate_clean_candidate() {
    let outcome: ValidationOutcome =
        validate(&day_shift(1, "2026-03-02"), &[], &RuleSet::default());
    assert!(outcome.is_clean());
    assert!(!outcome.is_blocked());
}

#[test]
fn test_validate_blocks_on_error() {
    let existing = vec![night_shift(1, "2026-03-02")];
    let outcome = validate(&day_shift(1, "2026-03-03"), &existing, &RuleSet::default());

    assert!(outcome.is_blocked());
    assert_eq!(outcome.violations[0].rule, RuleId::InsufficientRest);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_validate_routes_warnings_separately() {
    let rules = RuleSet::new(vec![Box::new(AlwaysWarn)]);
    let outcome = validate(&day_shift(1, "2026-03-02"), &[], &rules);

    assert!(!outcome.is_blocked());
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_validate_is_idempotent() {
    let existing = vec![
        day_shift(1, "2026-03-02"),
        day_shift(1, "2026-03-03"),
        night_shift(1, "2026-03-04"),
        day_shift(1, "2026-03-01"),
    ];
    let candidate = entry(1, "2026-03-05", ShiftType::Day, "07:00", "20:00");
    let rules = RuleSet::default();

    let first = validate(&candidate, &existing, &rules);
    let second = validate(&candidate, &existing, &rules);
    assert_eq!(first, second);
    assert_eq!(first.violations.len(), 2);
}

#[test]
fn test_validate_batch_checks_against_earlier_accepted() {
    let candidates = vec![
        night_shift(1, "2026-03-02"),
        day_shift(1, "2026-03-03"),
        day_shift(1, "2026-03-05"),
    ];

    let outcome: BatchOutcome = validate_batch(&candidates, &[], &RuleSet::default());

    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 1);
    assert_eq!(
        outcome.rejected[0].violations[0].rule,
        RuleId::InsufficientRest
    );
    assert!(!outcome.all_accepted());
}

#[test]
fn test_validate_batch_rejected_entries_do_not_count() {
    // The 13h shift is rejected, so the later 12h shift still fits
    let existing = vec![day_shift(1, "2026-03-02"), day_shift(1, "2026-03-03")];
    let candidates = vec![
        entry(1, "2026-03-04", ShiftType::Day, "07:00", "20:00"),
        day_shift(1, "2026-03-05"),
    ];

    let outcome = validate_batch(&candidates, &existing, &RuleSet::default());

    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].index, 0);
    assert_eq!(outcome.accepted, vec![day_shift(1, "2026-03-05")]);
}

#[test]
fn test_validate_batch_empty() {
    let outcome = validate_batch(&[], &[], &RuleSet::default());
    assert!(outcome.all_accepted());
    assert!(outcome.accepted.is_empty());
}
