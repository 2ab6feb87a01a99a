// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod initialization_tests;

use caretrack_audit::{Actor, Cause};
use caretrack_domain::{CarerId, PackageId, RotaEntry, ShiftTime, ShiftType, parse_date};
use time::Date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn date(value: &str) -> Date {
    parse_date(value).expect("Valid test date")
}

/// A 12-hour shift for package 1. DAY runs 08:00-20:00, NIGHT 20:00-08:00.
pub fn create_entry(carer: i64, day: &str, shift_type: ShiftType) -> RotaEntry {
    let (start, end) = match shift_type {
        ShiftType::Day => ("08:00", "20:00"),
        ShiftType::Night => ("20:00", "08:00"),
    };
    RotaEntry::new(
        CarerId::new(carer).unwrap(),
        PackageId::new(1).unwrap(),
        date(day),
        shift_type,
        ShiftTime::parse(start).unwrap(),
        ShiftTime::parse(end).unwrap(),
    )
    .with_created_by("scheduler")
}
