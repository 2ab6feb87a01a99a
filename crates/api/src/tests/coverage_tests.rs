// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::config;
use crate::{ApiError, CheckShiftCoverageRequest, check_shift_coverage};

fn request(assigned: Vec<i64>, competent: Vec<i64>) -> CheckShiftCoverageRequest {
    CheckShiftCoverageRequest {
        package_id: 12,
        date: String::from("2026-03-04"),
        shift_type: String::from("NIGHT"),
        assigned,
        competent,
    }
}

#[test]
fn test_covered_shift_has_no_warnings() {
    let response = check_shift_coverage(&config(), &request(vec![1, 2], vec![2, 9])).unwrap();

    assert_eq!(response.competent_count, 1);
    assert_eq!(response.minimum, 1);
    assert!(response.warnings.is_empty());
}

#[test]
fn test_uncovered_shift_warns() {
    let response = check_shift_coverage(&config(), &request(vec![1, 2], vec![3])).unwrap();

    assert_eq!(response.competent_count, 0);
    assert_eq!(response.warnings.len(), 1);
    assert_eq!(response.warnings[0].rule, "NO_COMPETENT_STAFF");
    assert_eq!(response.warnings[0].severity, "warning");
}

#[test]
fn test_bad_shift_type() {
    let mut bad = request(vec![1], vec![1]);
    bad.shift_type = String::from("EVENING");

    assert!(matches!(
        check_shift_coverage(&config(), &bad),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "shift_type"
    ));
}
