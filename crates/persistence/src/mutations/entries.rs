// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_domain::{EntryId, RotaEntry};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewRotaEntry;
use crate::diesel_schema::rota_entries;
use crate::error::PersistenceError;

/// Inserts entries in order and returns their assigned ids in the same order.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_entries(
    conn: &mut SqliteConnection,
    entries: &[RotaEntry],
) -> Result<Vec<EntryId>, PersistenceError> {
    let mut ids: Vec<EntryId> = Vec::with_capacity(entries.len());

    for entry in entries {
        diesel::insert_into(rota_entries::table)
            .values(NewRotaEntry::from(entry))
            .execute(conn)?;
        let entry_id: i64 = get_last_insert_rowid(conn)?;
        debug!(
            entry_id,
            carer_id = entry.carer_id.value(),
            date = %entry.date,
            shift_type = entry.shift_type.as_str(),
            "Inserted rota entry"
        );
        ids.push(EntryId::new(entry_id));
    }

    Ok(ids)
}

/// Sets the confirmation flag on one entry.
///
/// # Errors
///
/// Returns `EntryNotFound` if no entry has this id.
pub fn set_confirmation(
    conn: &mut SqliteConnection,
    entry_id: EntryId,
    confirmed: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        rota_entries::table.filter(rota_entries::entry_id.eq(entry_id.value())),
    )
    .set(rota_entries::is_confirmed.eq(i32::from(confirmed)))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EntryNotFound(entry_id.value()));
    }

    debug!(entry_id = entry_id.value(), confirmed, "Updated confirmation");
    Ok(())
}

/// Deletes entries and returns how many rows were removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_entries(
    conn: &mut SqliteConnection,
    entry_ids: &[EntryId],
) -> Result<usize, PersistenceError> {
    let ids: Vec<i64> = entry_ids.iter().map(EntryId::value).collect();
    let deleted: usize =
        diesel::delete(rota_entries::table.filter(rota_entries::entry_id.eq_any(ids)))
            .execute(conn)?;

    debug!(deleted, "Deleted rota entries");
    Ok(deleted)
}
