// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Minutes in one day.
pub(crate) const MINUTES_PER_DAY: u16 = 24 * 60;

/// Identifies a carer (care worker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarerId(i64);

impl CarerId {
    /// Creates a carer identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not positive.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidIdentifier {
                field: "carer_id",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CarerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a care package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(i64);

impl PackageId {
    /// Creates a package identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not positive.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidIdentifier {
                field: "package_id",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a persisted rota entry. Assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wraps a database row identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a scheduled shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftType {
    /// A daytime shift.
    Day,
    /// An overnight shift.
    Night,
}

impl ShiftType {
    /// Converts this shift type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::Night => "NIGHT",
        }
    }
}

impl FromStr for ShiftType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAY" => Ok(Self::Day),
            "NIGHT" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShiftType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A wall-clock time of day at minute granularity, with no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftTime {
    /// Minutes since midnight, `0..1440`.
    minutes: u16,
}

impl ShiftTime {
    /// Creates a time from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidShiftTime(format!(
                "{hour:02}:{minute:02}"
            )));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Parses an `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not two colon-separated numeric
    /// fields or the values are out of range.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidShiftTime(value.to_string());

        let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    /// Returns minutes since midnight.
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(&self) -> u16 {
        self.minutes / 60
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(&self) -> u16 {
        self.minutes % 60
    }
}

impl FromStr for ShiftTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One scheduled shift instance for a carer.
///
/// Only `date` takes part in week, weekend and rest calculations.
/// `start_time` and `end_time` determine the shift length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotaEntry {
    /// The persisted identifier. `None` for a candidate not yet stored.
    pub id: Option<EntryId>,
    /// The carer working the shift.
    pub carer_id: CarerId,
    /// The care package the shift serves.
    pub package_id: PackageId,
    /// The calendar date of the shift.
    pub date: Date,
    /// DAY or NIGHT.
    pub shift_type: ShiftType,
    /// Wall-clock start.
    pub start_time: ShiftTime,
    /// Wall-clock end. Earlier than `start_time` for overnight shifts.
    pub end_time: ShiftTime,
    /// Whether the shift has been confirmed.
    pub is_confirmed: bool,
    /// Identity of the operator who created the entry.
    pub created_by: String,
    /// When the entry was created.
    pub created_at: Option<OffsetDateTime>,
}

impl RotaEntry {
    /// Creates an unsaved, unconfirmed entry.
    #[must_use]
    pub const fn new(
        carer_id: CarerId,
        package_id: PackageId,
        date: Date,
        shift_type: ShiftType,
        start_time: ShiftTime,
        end_time: ShiftTime,
    ) -> Self {
        Self {
            id: None,
            carer_id,
            package_id,
            date,
            shift_type,
            start_time,
            end_time,
            is_confirmed: false,
            created_by: String::new(),
            created_at: None,
        }
    }

    /// Returns this entry with a persisted identifier.
    #[must_use]
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns this entry attributed to an operator.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Checks whether two values refer to the same stored entry.
    ///
    /// Unsaved entries are never the same as anything.
    #[must_use]
    pub fn is_same_entry(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Identifies which scheduling rule produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    /// Weekly scheduled hours exceed the cap.
    WeeklyHourLimit,
    /// A day shift follows a night shift too closely.
    InsufficientRest,
    /// A carer would work two weekends in a row.
    ConsecutiveWeekends,
    /// A shift lacks enough carers competent for the package.
    NoCompetentStaff,
}

impl RuleId {
    /// Converts this rule identifier to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklyHourLimit => "WEEKLY_HOUR_LIMIT",
            Self::InsufficientRest => "INSUFFICIENT_REST",
            Self::ConsecutiveWeekends => "CONSECUTIVE_WEEKENDS",
            Self::NoCompetentStaff => "NO_COMPETENT_STAFF",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a violation blocks a write or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the write.
    Error,
    /// Shown to the user; never blocks.
    Warning,
}

impl Severity {
    /// Converts this severity to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of one rule failing for one candidate entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleViolation {
    /// The rule that raised this violation.
    pub rule: RuleId,
    /// Human-readable description.
    pub message: String,
    /// Blocking or advisory.
    pub severity: Severity,
}

impl RuleViolation {
    /// Creates a blocking violation.
    #[must_use]
    pub const fn error(rule: RuleId, message: String) -> Self {
        Self {
            rule,
            message,
            severity: Severity::Error,
        }
    }

    /// Creates an advisory violation.
    #[must_use]
    pub const fn warning(rule: RuleId, message: String) -> Self {
        Self {
            rule,
            message,
            severity: Severity::Warning,
        }
    }

    /// Returns whether this violation blocks a write.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

/// A violation attached to the entry it was computed for.
///
/// Produced when re-evaluating an already saved schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryViolation {
    /// The entry that fails the rule. `None` only for unsaved entries.
    pub entry_id: Option<EntryId>,
    /// The carer the entry belongs to.
    pub carer_id: CarerId,
    /// The entry's date.
    pub date: Date,
    /// The entry's shift type.
    pub shift_type: ShiftType,
    /// The violation itself.
    pub violation: RuleViolation,
}

impl EntryViolation {
    /// Attaches a violation to an entry.
    #[must_use]
    pub fn for_entry(entry: &RotaEntry, violation: RuleViolation) -> Self {
        Self {
            entry_id: entry.id,
            carer_id: entry.carer_id,
            date: entry.date,
            shift_type: entry.shift_type,
            violation,
        }
    }
}
