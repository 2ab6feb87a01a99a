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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod dispatch;
mod error;
mod rules;
mod shift_time;
mod summary;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_MAX_WEEKLY_HOURS, DEFAULT_MIN_COMPETENT_STAFF, DEFAULT_MIN_REST_HOURS,
    DEFAULT_WEEKEND_GAP_DAYS, REST_LOOKBACK_DAYS, RotaRuleConfig,
};
pub use dispatch::{ShiftCoverage, check_competent_coverage};
pub use error::DomainError;
pub use rules::{ConsecutiveWeekends, InsufficientRest, RuleSet, SchedulingRule, WeeklyHourLimit};
pub use shift_time::{
    days_between, format_hours, in_range, is_weekend, minutes_to_hours, parse_date, shift_hours,
    shift_minutes, week_end, week_start,
};
pub use summary::{WeeklyScheduleSummary, summarize, summarize_week};
pub use types::{
    CarerId, EntryId, EntryViolation, PackageId, RotaEntry, RuleId, RuleViolation, Severity,
    ShiftTime, ShiftType,
};
pub use validation::{
    BatchOutcome, RejectedEntry, ValidationOutcome, validate, validate_batch,
};
