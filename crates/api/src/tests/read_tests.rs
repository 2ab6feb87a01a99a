// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_domain::RotaRuleConfig;

use crate::tests::helpers::{config, fresh_persistence, seed};
use crate::{ApiError, get_audit_timeline, get_week_schedule, get_weekly_summary};

#[test]
fn test_weekly_summary_totals() {
    let mut persistence = fresh_persistence();
    seed(&mut persistence, 1, "2026-03-02", "NIGHT");
    seed(&mut persistence, 1, "2026-03-05", "DAY");
    seed(&mut persistence, 1, "2026-03-10", "DAY");

    let summary = get_weekly_summary(&mut persistence, &config(), 1, "2026-03-04").unwrap();

    assert_eq!(summary.week_start, "2026-03-02");
    assert_eq!(summary.week_end, "2026-03-08");
    assert!((summary.total_hours - 24.0).abs() < f64::EPSILON);
    assert_eq!(summary.day_shifts, 1);
    assert_eq!(summary.night_shifts, 1);
    assert!(summary.violations.is_empty());
}

#[test]
fn test_weekly_summary_surfaces_saved_violations() {
    let mut persistence = fresh_persistence();
    seed(&mut persistence, 2, "2026-03-02", "DAY");
    seed(&mut persistence, 2, "2026-03-03", "DAY");
    seed(&mut persistence, 2, "2026-03-04", "DAY");

    // A tighter cap makes the already-saved week over the limit
    let strict: RotaRuleConfig = RotaRuleConfig::new(24, 48, 7, 1).unwrap();
    let summary = get_weekly_summary(&mut persistence, &strict, 2, "2026-03-02").unwrap();

    assert!(!summary.violations.is_empty());
    assert!(
        summary
            .violations
            .iter()
            .all(|v| v.violation.rule == "WEEKLY_HOUR_LIMIT")
    );
}

#[test]
fn test_week_schedule_lists_entries_and_summaries() {
    let mut persistence = fresh_persistence();
    seed(&mut persistence, 3, "2026-02-28", "DAY");
    seed(&mut persistence, 3, "2026-03-03", "DAY");
    seed(&mut persistence, 1, "2026-03-08", "NIGHT");

    let schedule = get_week_schedule(&mut persistence, &config(), "2026-03-08").unwrap();

    assert_eq!(schedule.week_start, "2026-03-02");
    assert_eq!(schedule.entries.len(), 2);
    let carers: Vec<i64> = schedule.summaries.iter().map(|s| s.carer_id).collect();
    assert_eq!(carers, vec![1, 3]);
}

#[test]
fn test_week_schedule_rejects_bad_date() {
    let mut persistence = fresh_persistence();

    let result = get_week_schedule(&mut persistence, &config(), "March 2nd");

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_audit_timeline_filters_by_carer() {
    let mut persistence = fresh_persistence();
    seed(&mut persistence, 4, "2026-03-02", "DAY");
    seed(&mut persistence, 5, "2026-03-02", "DAY");
    seed(&mut persistence, 4, "2026-03-03", "DAY");

    let all = get_audit_timeline(&mut persistence, None).unwrap();
    let carer_four = get_audit_timeline(&mut persistence, Some(4)).unwrap();

    assert_eq!(all.events.len(), 3);
    assert_eq!(carer_four.events.len(), 2);
    assert!(carer_four.events.iter().all(|e| e.action == "CreateEntry"));
    assert_eq!(carer_four.events[0].actor_id, "admin-123");
}

#[test]
fn test_audit_timeline_rejects_bad_carer() {
    let mut persistence = fresh_persistence();

    assert!(matches!(
        get_audit_timeline(&mut persistence, Some(0)),
        Err(ApiError::InvalidInput { .. })
    ));
}
