// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling rules evaluated against a candidate rota entry.
//!
//! Every rule is pure: it reads the candidate and the full set of known
//! entries and returns zero or more violations. Rules only look at entries
//! belonging to the candidate's carer and skip the stored copy of the
//! candidate itself.
//!
//! ## Evaluation Order
//!
//! [`RuleSet::standard`] runs, in order:
//!
//! 1. [`WeeklyHourLimit`]
//! 2. [`InsufficientRest`]
//! 3. [`ConsecutiveWeekends`]
//!
//! The order is fixed so that identical input always yields an identical,
//! identically ordered violation list.
//!
//! ## Known Approximation
//!
//! Rest and weekend checks compare calendar dates, not the actual elapsed
//! time between a shift's end and the next shift's start.

use crate::config::{REST_LOOKBACK_DAYS, RotaRuleConfig};
use crate::shift_time::{
    days_between, format_hours, in_range, is_weekend, minutes_to_hours, shift_minutes, week_end,
    week_start,
};
use crate::types::{RotaEntry, RuleId, RuleViolation, ShiftType};
use time::Duration;

/// A single scheduling constraint.
pub trait SchedulingRule: Send + Sync {
    /// The identifier attached to violations from this rule.
    fn rule_id(&self) -> RuleId;

    /// Evaluates `candidate` against `entries`.
    ///
    /// `entries` may contain other carers' entries and may contain the
    /// stored copy of `candidate`; both are ignored.
    fn evaluate(&self, candidate: &RotaEntry, entries: &[RotaEntry]) -> Vec<RuleViolation>;
}

/// Iterates over the candidate carer's other entries.
fn carer_history<'a>(
    candidate: &'a RotaEntry,
    entries: &'a [RotaEntry],
) -> impl Iterator<Item = &'a RotaEntry> + 'a {
    entries
        .iter()
        .filter(move |e| e.carer_id == candidate.carer_id && !e.is_same_entry(candidate))
}

/// Caps the total scheduled hours per carer per Monday-start week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyHourLimit {
    max_hours: u32,
}

impl WeeklyHourLimit {
    /// Creates the rule with a cap in hours.
    #[must_use]
    pub const fn new(max_hours: u32) -> Self {
        Self { max_hours }
    }
}

impl SchedulingRule for WeeklyHourLimit {
    fn rule_id(&self) -> RuleId {
        RuleId::WeeklyHourLimit
    }

    fn evaluate(&self, candidate: &RotaEntry, entries: &[RotaEntry]) -> Vec<RuleViolation> {
        let from = week_start(candidate.date);
        let to = week_end(candidate.date);

        let current_minutes: u32 = carer_history(candidate, entries)
            .filter(|e| in_range(e.date, from, to))
            .map(shift_minutes)
            .fold(0, u32::saturating_add);
        let adding_minutes: u32 = shift_minutes(candidate);
        let total_minutes: u32 = current_minutes.saturating_add(adding_minutes);

        if u64::from(total_minutes) <= u64::from(self.max_hours) * 60 {
            return Vec::new();
        }

        vec![RuleViolation::error(
            self.rule_id(),
            format!(
                "Weekly hour limit exceeded: {}h scheduled (currently {}h, adding {}h), limit is {}h",
                format_hours(minutes_to_hours(total_minutes)),
                format_hours(minutes_to_hours(current_minutes)),
                format_hours(minutes_to_hours(adding_minutes)),
                self.max_hours
            ),
        )]
    }
}

/// Requires a minimum rest between a night shift and a following day shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientRest {
    min_rest_hours: u32,
}

impl InsufficientRest {
    /// Creates the rule with a minimum rest in hours.
    #[must_use]
    pub const fn new(min_rest_hours: u32) -> Self {
        Self { min_rest_hours }
    }
}

impl SchedulingRule for InsufficientRest {
    fn rule_id(&self) -> RuleId {
        RuleId::InsufficientRest
    }

    fn evaluate(&self, candidate: &RotaEntry, entries: &[RotaEntry]) -> Vec<RuleViolation> {
        let lookback_start = candidate
            .date
            .saturating_sub(Duration::days(i64::from(REST_LOOKBACK_DAYS)));

        // Latest shift in the trailing window; same-date ties go to the later start
        let previous: Option<&RotaEntry> = carer_history(candidate, entries)
            .filter(|e| e.date < candidate.date && e.date >= lookback_start)
            .max_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then_with(|| a.start_time.cmp(&b.start_time))
            });

        let Some(previous) = previous else {
            return Vec::new();
        };

        if previous.shift_type != ShiftType::Night || candidate.shift_type != ShiftType::Day {
            return Vec::new();
        }

        let elapsed_hours: i64 = days_between(previous.date, candidate.date) * 24;
        if elapsed_hours >= i64::from(self.min_rest_hours) {
            return Vec::new();
        }

        vec![RuleViolation::error(
            self.rule_id(),
            format!(
                "Insufficient rest after night shift on {}: {elapsed_hours}h before day shift on {}, minimum is {}h",
                previous.date, candidate.date, self.min_rest_hours
            ),
        )]
    }
}

/// Prevents a carer from working two weekends in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsecutiveWeekends {
    gap_days: u32,
}

impl ConsecutiveWeekends {
    /// Creates the rule. Weekend shifts `gap_days` apart or closer conflict.
    #[must_use]
    pub const fn new(gap_days: u32) -> Self {
        Self { gap_days }
    }
}

impl SchedulingRule for ConsecutiveWeekends {
    fn rule_id(&self) -> RuleId {
        RuleId::ConsecutiveWeekends
    }

    fn evaluate(&self, candidate: &RotaEntry, entries: &[RotaEntry]) -> Vec<RuleViolation> {
        if !is_weekend(candidate.date) {
            return Vec::new();
        }

        let previous_weekend: Option<&RotaEntry> = carer_history(candidate, entries)
            .filter(|e| is_weekend(e.date) && e.date < candidate.date)
            .max_by_key(|e| e.date);

        let Some(previous) = previous_weekend else {
            return Vec::new();
        };

        let gap: i64 = days_between(previous.date, candidate.date);
        if gap > i64::from(self.gap_days) {
            return Vec::new();
        }

        vec![RuleViolation::error(
            self.rule_id(),
            format!(
                "Cannot schedule consecutive weekends: already scheduled on {} ({gap} days before {})",
                previous.date, candidate.date
            ),
        )]
    }
}

/// An ordered collection of scheduling rules.
pub struct RuleSet {
    rules: Vec<Box<dyn SchedulingRule>>,
}

impl RuleSet {
    /// Creates a rule set that runs `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn SchedulingRule>>) -> Self {
        Self { rules }
    }

    /// The standard rota rules: hour limit, rest period, consecutive weekends.
    #[must_use]
    pub fn standard(config: &RotaRuleConfig) -> Self {
        Self::new(vec![
            Box::new(WeeklyHourLimit::new(config.max_weekly_hours)),
            Box::new(InsufficientRest::new(config.min_rest_hours)),
            Box::new(ConsecutiveWeekends::new(config.consecutive_weekend_gap_days)),
        ])
    }

    /// Runs every rule in order and concatenates their violations.
    #[must_use]
    pub fn evaluate(&self, candidate: &RotaEntry, entries: &[RotaEntry]) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .flat_map(|rule| rule.evaluate(candidate, entries))
            .collect()
    }

    /// The rule identifiers in evaluation order.
    #[must_use]
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|rule| rule.rule_id()).collect()
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard(&RotaRuleConfig::default())
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rule_ids())
            .finish()
    }
}
