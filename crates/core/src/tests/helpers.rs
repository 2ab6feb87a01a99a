// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_audit::{Actor, Cause};
use caretrack_domain::{
    CarerId, EntryId, PackageId, RotaEntry, ShiftTime, ShiftType, parse_date,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Rota grid drag and drop"))
}

pub fn create_entry(carer: i64, date: &str, shift_type: ShiftType) -> RotaEntry {
    let (start, end) = match shift_type {
        ShiftType::Day => ("08:00", "20:00"),
        ShiftType::Night => ("20:00", "08:00"),
    };
    RotaEntry::new(
        CarerId::new(carer).unwrap(),
        PackageId::new(1).unwrap(),
        parse_date(date).unwrap(),
        shift_type,
        ShiftTime::parse(start).unwrap(),
        ShiftTime::parse(end).unwrap(),
    )
}

pub fn create_stored_entry(id: i64, carer: i64, date: &str, shift_type: ShiftType) -> RotaEntry {
    create_entry(carer, date, shift_type).with_id(EntryId::new(id))
}
