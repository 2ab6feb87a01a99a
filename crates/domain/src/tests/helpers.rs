// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CarerId, EntryId, PackageId, RotaEntry, ShiftTime, ShiftType, parse_date};
use time::Date;

pub fn carer(id: i64) -> CarerId {
    CarerId::new(id).unwrap()
}

pub fn package() -> PackageId {
    PackageId::new(1).unwrap()
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn shift_time(value: &str) -> ShiftTime {
    ShiftTime::parse(value).unwrap()
}

/// An unsaved entry for carer `carer_id`.
pub fn entry(carer_id: i64, day: &str, shift: ShiftType, start: &str, end: &str) -> RotaEntry {
    RotaEntry::new(
        carer(carer_id),
        package(),
        date(day),
        shift,
        shift_time(start),
        shift_time(end),
    )
}

/// A 12-hour day shift, 08:00 to 20:00.
pub fn day_shift(carer_id: i64, day: &str) -> RotaEntry {
    entry(carer_id, day, ShiftType::Day, "08:00", "20:00")
}

/// A 12-hour night shift, 20:00 to 08:00.
pub fn night_shift(carer_id: i64, day: &str) -> RotaEntry {
    entry(carer_id, day, ShiftType::Night, "20:00", "08:00")
}

/// Saves an entry under a fixed identifier.
pub fn stored(entry: RotaEntry, id: i64) -> RotaEntry {
    entry.with_id(EntryId::new(id))
}
