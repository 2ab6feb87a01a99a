// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift length and calendar arithmetic for rota entries.
//!
//! ## Invariants
//!
//! - Weeks start on Monday and end on Sunday
//! - A shift whose end is earlier than its start runs overnight; no shift
//!   is 24 hours or longer
//! - Weekend membership is decided by the stored calendar date only

use crate::error::DomainError;
use crate::types::{MINUTES_PER_DAY, RotaEntry};
use time::macros::format_description;
use time::{Date, Duration, Weekday};

/// Returns the length of a shift in minutes.
///
/// `start == end` is a zero-length shift, not a full day.
#[must_use]
pub fn shift_minutes(entry: &RotaEntry) -> u32 {
    let start = entry.start_time.minutes_since_midnight();
    let end = entry.end_time.minutes_since_midnight();

    let minutes = if end >= start {
        end - start
    } else {
        // Overnight: wraps past midnight
        end + MINUTES_PER_DAY - start
    };

    u32::from(minutes)
}

/// Returns the length of a shift in hours.
#[must_use]
pub fn shift_hours(entry: &RotaEntry) -> f64 {
    minutes_to_hours(shift_minutes(entry))
}

/// Converts a minute count to fractional hours.
#[must_use]
pub fn minutes_to_hours(minutes: u32) -> f64 {
    f64::from(minutes) / 60.0
}

/// Returns the Monday at or before `date`.
///
/// A Sunday belongs to the week that began six days earlier.
#[must_use]
pub fn week_start(date: Date) -> Date {
    let offset: u8 = date.weekday().number_days_from_monday();
    date.saturating_sub(Duration::days(i64::from(offset)))
}

/// Returns the Sunday ending the week that contains `date`.
#[must_use]
pub fn week_end(date: Date) -> Date {
    week_start(date).saturating_add(Duration::days(6))
}

/// Returns whether `date` is a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Returns the signed number of whole days from `from` to `to`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Returns whether `date` falls within `[from, to]`.
#[must_use]
pub fn in_range(date: Date, from: Date, to: Date) -> bool {
    date >= from && date <= to
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats an hour count without trailing zeros (`12`, `7.5`, `7.25`).
#[must_use]
pub fn format_hours(hours: f64) -> String {
    let formatted: String = format!("{hours:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
