// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota entry queries.
//!
//! Every list query returns entries ordered by date, then start time, then
//! id. Dates are stored as `YYYY-MM-DD` text, so lexical comparison is
//! calendar comparison.

use caretrack_domain::{CarerId, EntryId, RotaEntry};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;

use crate::data_models::RotaEntryRow;
use crate::diesel_schema::rota_entries;
use crate::error::PersistenceError;

fn into_entries(rows: Vec<RotaEntryRow>) -> Result<Vec<RotaEntry>, PersistenceError> {
    rows.into_iter().map(RotaEntry::try_from).collect()
}

/// Retrieves every entry for one carer within `[from, to]`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn entries_for_carer(
    conn: &mut SqliteConnection,
    carer_id: CarerId,
    from: Date,
    to: Date,
) -> Result<Vec<RotaEntry>, PersistenceError> {
    let rows: Vec<RotaEntryRow> = rota_entries::table
        .filter(rota_entries::carer_id.eq(carer_id.value()))
        .filter(rota_entries::entry_date.ge(from.to_string()))
        .filter(rota_entries::entry_date.le(to.to_string()))
        .order((
            rota_entries::entry_date.asc(),
            rota_entries::start_time.asc(),
            rota_entries::entry_id.asc(),
        ))
        .select(RotaEntryRow::as_select())
        .load(conn)?;

    into_entries(rows)
}

/// Retrieves every entry for all carers within `[from, to]`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn entries_in_range(
    conn: &mut SqliteConnection,
    from: Date,
    to: Date,
) -> Result<Vec<RotaEntry>, PersistenceError> {
    let rows: Vec<RotaEntryRow> = rota_entries::table
        .filter(rota_entries::entry_date.ge(from.to_string()))
        .filter(rota_entries::entry_date.le(to.to_string()))
        .order((
            rota_entries::entry_date.asc(),
            rota_entries::start_time.asc(),
            rota_entries::entry_id.asc(),
        ))
        .select(RotaEntryRow::as_select())
        .load(conn)?;

    into_entries(rows)
}

/// Retrieves a single entry.
///
/// # Errors
///
/// Returns `EntryNotFound` if no entry has this id.
pub fn get_entry(
    conn: &mut SqliteConnection,
    entry_id: EntryId,
) -> Result<RotaEntry, PersistenceError> {
    let row: Option<RotaEntryRow> = rota_entries::table
        .filter(rota_entries::entry_id.eq(entry_id.value()))
        .select(RotaEntryRow::as_select())
        .first(conn)
        .optional()?;

    row.map_or_else(
        || Err(PersistenceError::EntryNotFound(entry_id.value())),
        RotaEntry::try_from,
    )
}

/// Retrieves the entries with the given ids. Unknown ids are skipped.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn entries_by_ids(
    conn: &mut SqliteConnection,
    entry_ids: &[EntryId],
) -> Result<Vec<RotaEntry>, PersistenceError> {
    let ids: Vec<i64> = entry_ids.iter().map(EntryId::value).collect();
    let rows: Vec<RotaEntryRow> = rota_entries::table
        .filter(rota_entries::entry_id.eq_any(ids))
        .order((
            rota_entries::entry_date.asc(),
            rota_entries::start_time.asc(),
            rota_entries::entry_id.asc(),
        ))
        .select(RotaEntryRow::as_select())
        .load(conn)?;

    into_entries(rows)
}
