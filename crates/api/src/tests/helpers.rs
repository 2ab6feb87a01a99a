// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use caretrack_audit::{Actor, Cause};
use caretrack_domain::RotaRuleConfig;
use caretrack_persistence::Persistence;

use crate::{CreateEntryRequest, RotaEntryInput, create_entry};

pub fn create_test_admin() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn config() -> RotaRuleConfig {
    RotaRuleConfig::default()
}

pub fn fresh_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// A 12-hour shift for package 7. DAY runs 08:00-20:00, NIGHT 20:00-08:00.
pub fn input(carer: i64, date: &str, shift_type: &str) -> RotaEntryInput {
    let (start, end) = if shift_type == "NIGHT" {
        ("20:00", "08:00")
    } else {
        ("08:00", "20:00")
    };
    RotaEntryInput {
        carer_id: carer,
        package_id: 7,
        date: date.to_string(),
        shift_type: shift_type.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// Creates an entry through the API and returns its id.
pub fn seed(persistence: &mut Persistence, carer: i64, date: &str, shift_type: &str) -> i64 {
    create_entry(
        persistence,
        &config(),
        &CreateEntryRequest {
            entry: input(carer, date, shift_type),
        },
        create_test_admin(),
        create_test_cause(),
    )
    .unwrap()
    .entry
    .entry_id
}
