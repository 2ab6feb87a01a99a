// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly per-carer schedule summaries.
//!
//! Summaries are recomputed from raw entries on every read. Violations are
//! attached by running the same [`RuleSet`] the write path uses, so a saved
//! week and the write guard always agree on what is a violation.

use crate::rules::RuleSet;
use crate::shift_time::{in_range, minutes_to_hours, shift_minutes, week_end, week_start};
use crate::types::{CarerId, EntryViolation, RotaEntry, ShiftType};
use std::collections::BTreeSet;
use time::Date;

/// Derived weekly totals for one carer.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyScheduleSummary {
    /// The carer summarized.
    pub carer_id: CarerId,
    /// Monday of the week.
    pub week_start: Date,
    /// Sunday of the week.
    pub week_end: Date,
    /// Total scheduled hours.
    pub total_hours: f64,
    /// Number of DAY shifts.
    pub day_shifts: u32,
    /// Number of NIGHT shifts.
    pub night_shifts: u32,
    /// Violations raised by entries in this week.
    pub violations: Vec<EntryViolation>,
}

impl WeeklyScheduleSummary {
    /// Total number of shifts in the week.
    #[must_use]
    pub const fn shift_count(&self) -> u32 {
        self.day_shifts + self.night_shifts
    }
}

/// Summarizes one carer's week.
///
/// # Arguments
///
/// * `carer_id` - The carer to summarize
/// * `week_of` - Any date in the week; normalized to its Monday
/// * `entries` - All known entries covering at least the summary window
///   (see [`crate::RotaRuleConfig::summary_window`])
/// * `rules` - The rules used to attach violations
#[must_use]
pub fn summarize(
    carer_id: CarerId,
    week_of: Date,
    entries: &[RotaEntry],
    rules: &RuleSet,
) -> WeeklyScheduleSummary {
    let from: Date = week_start(week_of);
    let to: Date = week_end(week_of);

    let mut in_week: Vec<(usize, &RotaEntry)> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.carer_id == carer_id && in_range(e.date, from, to))
        .collect();
    in_week.sort_by(|(_, a), (_, b)| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut total_minutes: u32 = 0;
    let mut day_shifts: u32 = 0;
    let mut night_shifts: u32 = 0;
    let mut violations: Vec<EntryViolation> = Vec::new();

    // One working copy; each entry is lifted out while it is evaluated
    let mut others: Vec<RotaEntry> = if in_week.is_empty() {
        Vec::new()
    } else {
        entries.to_vec()
    };

    for (index, entry) in &in_week {
        total_minutes += shift_minutes(entry);
        match entry.shift_type {
            ShiftType::Day => day_shifts += 1,
            ShiftType::Night => night_shifts += 1,
        }

        let lifted: RotaEntry = others.remove(*index);
        violations.extend(
            rules
                .evaluate(entry, &others)
                .into_iter()
                .map(|v| EntryViolation::for_entry(entry, v)),
        );
        others.insert(*index, lifted);
    }

    WeeklyScheduleSummary {
        carer_id,
        week_start: from,
        week_end: to,
        total_hours: minutes_to_hours(total_minutes),
        day_shifts,
        night_shifts,
        violations,
    }
}

/// Summarizes every carer with at least one entry in the week.
///
/// Summaries are ordered by carer identifier.
#[must_use]
pub fn summarize_week(
    week_of: Date,
    entries: &[RotaEntry],
    rules: &RuleSet,
) -> Vec<WeeklyScheduleSummary> {
    let from: Date = week_start(week_of);
    let to: Date = week_end(week_of);

    let carers: BTreeSet<CarerId> = entries
        .iter()
        .filter(|e| in_range(e.date, from, to))
        .map(|e| e.carer_id)
        .collect();

    carers
        .into_iter()
        .map(|carer_id| summarize(carer_id, from, entries, rules))
        .collect()
}
