// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while building or validating domain values.
///
/// Scheduling rule violations are not errors. They are returned as
/// [`crate::RuleViolation`] values from the rule evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A wall-clock time is not in `HH:MM` form or is out of range.
    InvalidShiftTime(String),
    /// A shift type is not `DAY` or `NIGHT`.
    InvalidShiftType(String),
    /// Failed to parse a calendar date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A numeric identifier is not positive.
    InvalidIdentifier {
        /// The identifier field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A rule configuration value is out of range.
    InvalidRuleConfig {
        /// The configuration field name.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShiftTime(value) => {
                write!(f, "Invalid shift time '{value}': expected HH:MM")
            }
            Self::InvalidShiftType(value) => {
                write!(f, "Invalid shift type '{value}': expected DAY or NIGHT")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidIdentifier { field, value } => {
                write!(f, "Invalid {field}: {value}. Must be greater than 0")
            }
            Self::InvalidRuleConfig { field, reason } => {
                write!(f, "Invalid rule configuration for '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
