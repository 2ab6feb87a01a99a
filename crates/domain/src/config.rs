// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::shift_time::week_end;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// Default cap on scheduled hours per carer per week.
pub const DEFAULT_MAX_WEEKLY_HOURS: u32 = 36;
/// Default minimum rest between a night shift and a following day shift.
pub const DEFAULT_MIN_REST_HOURS: u32 = 48;
/// Default gap (in days) at or below which two weekend shifts are consecutive.
pub const DEFAULT_WEEKEND_GAP_DAYS: u32 = 7;
/// Default minimum number of competent carers on a shift.
pub const DEFAULT_MIN_COMPETENT_STAFF: u32 = 1;

/// How far back the rest-period rule looks for a prior shift.
pub const REST_LOOKBACK_DAYS: u32 = 7;

/// Tunable limits for the scheduling rules.
///
/// Deserialization goes through [`RotaRuleConfig::new`], so a config read
/// from JSON is always valid. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RotaRuleConfigFields")]
pub struct RotaRuleConfig {
    /// Maximum scheduled hours per carer per Monday-start week.
    pub max_weekly_hours: u32,
    /// Minimum hours between a night shift and a following day shift.
    pub min_rest_hours: u32,
    /// Two weekend shifts this many days apart (or fewer) are consecutive.
    pub consecutive_weekend_gap_days: u32,
    /// Minimum competent carers per dispatched shift. `0` disables the check.
    pub min_competent_staff: u32,
}

impl Default for RotaRuleConfig {
    fn default() -> Self {
        Self {
            max_weekly_hours: DEFAULT_MAX_WEEKLY_HOURS,
            min_rest_hours: DEFAULT_MIN_REST_HOURS,
            consecutive_weekend_gap_days: DEFAULT_WEEKEND_GAP_DAYS,
            min_competent_staff: DEFAULT_MIN_COMPETENT_STAFF,
        }
    }
}

/// Unvalidated wire form of [`RotaRuleConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RotaRuleConfigFields {
    max_weekly_hours: u32,
    min_rest_hours: u32,
    consecutive_weekend_gap_days: u32,
    min_competent_staff: u32,
}

impl Default for RotaRuleConfigFields {
    fn default() -> Self {
        Self {
            max_weekly_hours: DEFAULT_MAX_WEEKLY_HOURS,
            min_rest_hours: DEFAULT_MIN_REST_HOURS,
            consecutive_weekend_gap_days: DEFAULT_WEEKEND_GAP_DAYS,
            min_competent_staff: DEFAULT_MIN_COMPETENT_STAFF,
        }
    }
}

impl TryFrom<RotaRuleConfigFields> for RotaRuleConfig {
    type Error = DomainError;

    fn try_from(fields: RotaRuleConfigFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.max_weekly_hours,
            fields.min_rest_hours,
            fields.consecutive_weekend_gap_days,
            fields.min_competent_staff,
        )
    }
}

impl RotaRuleConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any rota limit is zero or the weekly cap exceeds
    /// the hours in a week.
    pub fn new(
        max_weekly_hours: u32,
        min_rest_hours: u32,
        consecutive_weekend_gap_days: u32,
        min_competent_staff: u32,
    ) -> Result<Self, DomainError> {
        let config: Self = Self {
            max_weekly_hours,
            min_rest_hours,
            consecutive_weekend_gap_days,
            min_competent_staff,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every limit is usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_weekly_hours == 0 || self.max_weekly_hours > 7 * 24 {
            return Err(DomainError::InvalidRuleConfig {
                field: "max_weekly_hours",
                reason: format!("must be between 1 and 168, got {}", self.max_weekly_hours),
            });
        }
        if self.min_rest_hours == 0 {
            return Err(DomainError::InvalidRuleConfig {
                field: "min_rest_hours",
                reason: String::from("must be greater than 0"),
            });
        }
        if self.consecutive_weekend_gap_days == 0 {
            return Err(DomainError::InvalidRuleConfig {
                field: "consecutive_weekend_gap_days",
                reason: String::from("must be greater than 0"),
            });
        }
        Ok(())
    }

    /// Number of days before a candidate's date that the rules can look at.
    #[must_use]
    pub fn lookback_days(&self) -> u32 {
        REST_LOOKBACK_DAYS.max(self.consecutive_weekend_gap_days)
    }

    /// Returns the inclusive date range a caller must load to validate an
    /// entry dated `date`.
    ///
    /// Covers the whole Monday-start week of `date` plus the rule lookback.
    #[must_use]
    pub fn validation_window(&self, date: Date) -> (Date, Date) {
        let from: Date = date.saturating_sub(Duration::days(i64::from(self.lookback_days())));
        (from, week_end(date))
    }

    /// Returns the inclusive date range needed to summarize a week.
    #[must_use]
    pub fn summary_window(&self, week_start: Date) -> (Date, Date) {
        let (from, _) = self.validation_window(week_start);
        (from, week_end(week_start))
    }
}
