// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{carer, date, package};
use crate::{RuleId, Severity, ShiftCoverage, ShiftType, check_competent_coverage};

fn coverage(assigned: &[i64], competent: &[i64]) -> ShiftCoverage {
    ShiftCoverage {
        package_id: package(),
        date: date("2026-03-02"),
        shift_type: ShiftType::Night,
        assigned: assigned.iter().map(|id| carer(*id)).collect(),
        competent: competent.iter().map(|id| carer(*id)).collect(),
    }
}

#[test]
fn test_coverage_met() {
    assert!(check_competent_coverage(&coverage(&[1, 2], &[2]), 1).is_empty());
}

#[test]
fn test_coverage_missing_is_a_warning() {
    let warnings = check_competent_coverage(&coverage(&[1, 2], &[3]), 1);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].rule, RuleId::NoCompetentStaff);
    assert_eq!(warnings[0].severity, Severity::Warning);
    assert!(!warnings[0].is_blocking());
    assert!(warnings[0].message.contains("NIGHT shift on 2026-03-02"));
}

#[test]
fn test_coverage_counts_distinct_carers() {
    let shift = coverage(&[1, 1], &[1]);
    assert_eq!(shift.competent_count(), 1);
    assert_eq!(check_competent_coverage(&shift, 2).len(), 1);
}

#[test]
fn test_coverage_zero_minimum_disables_check() {
    assert!(check_competent_coverage(&coverage(&[], &[]), 0).is_empty());
}
