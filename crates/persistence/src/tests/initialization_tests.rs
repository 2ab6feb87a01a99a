// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Migrations and foreign key enforcement are also exercised by every other
//! persistence test through `Persistence::new_in_memory()`.

use crate::Persistence;
use crate::tests::create_entry;
use caretrack_domain::{CarerId, ShiftType};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, crate::error::PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.insert_entries(&[create_entry(1, "2026-03-02", ShiftType::Day)])
        .unwrap();

    let carer = CarerId::new(1).unwrap();
    let from = crate::tests::date("2026-03-01");
    let to = crate::tests::date("2026-03-31");

    assert_eq!(db1.entries_for_carer(carer, from, to).unwrap().len(), 1);
    assert!(db2.entries_for_carer(carer, from, to).unwrap().is_empty());
}

#[test]
fn test_file_backed_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "caretrack_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .insert_entries(&[create_entry(4, "2026-03-03", ShiftType::Night)])
            .unwrap();
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let entries = reopened
        .entries_in_range(
            crate::tests::date("2026-03-02"),
            crate::tests::date("2026-03-08"),
        )
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].shift_type, ShiftType::Night);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
