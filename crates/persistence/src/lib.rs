// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for CareTrack rota scheduling.
//!
//! This crate stores rota entries and the audit trail of every change made
//! to them. It is built on Diesel over `SQLite`.
//!
//! ## Storage Model
//!
//! - `rota_entries` holds one row per scheduled shift. Dates are stored as
//!   `YYYY-MM-DD` text and shift times as `HH:MM` text.
//! - `audit_events` holds one row per successful change. Actor, cause,
//!   action and snapshots are stored as JSON text.
//!
//! A rota change and its audit event are always written in the same
//! transaction (see [`Persistence::persist_transition`]).
//!
//! ## Testing
//!
//! - Tests run against isolated in-memory databases
//! - File-backed databases enable WAL mode
//! - Foreign key enforcement is verified on every connection

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use caretrack::TransitionResult;
use caretrack_audit::AuditEvent;
use caretrack_domain::{CarerId, EntryId, RotaEntry};
use diesel::SqliteConnection;
use std::sync::atomic::AtomicU64;
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
pub(crate) static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Persistence adapter for rota entries and audit events.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    // ========================================================================
    // Writes
    // ========================================================================

    /// Persists a transition: the rota mutation and its audit event.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition result to persist
    ///
    /// # Returns
    ///
    /// A `PersistTransitionResult` with the audit event ID and the IDs
    /// assigned to any inserted entries.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is written in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::transition::persist_transition(&mut self.conn, result)
    }

    /// Inserts entries without an audit event.
    ///
    /// Used for seeding. Application writes go through
    /// [`Self::persist_transition`].
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn insert_entries(&mut self, entries: &[RotaEntry]) -> Result<Vec<EntryId>, PersistenceError> {
        mutations::entries::insert_entries(&mut self.conn, entries)
    }

    /// Sets the confirmation flag on an entry without an audit event.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist.
    pub fn set_confirmation(
        &mut self,
        entry_id: EntryId,
        confirmed: bool,
    ) -> Result<(), PersistenceError> {
        mutations::entries::set_confirmation(&mut self.conn, entry_id, confirmed)
    }

    /// Deletes entries without an audit event.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_entries(&mut self, entry_ids: &[EntryId]) -> Result<usize, PersistenceError> {
        mutations::entries::delete_entries(&mut self.conn, entry_ids)
    }

    /// Persists an audit event on its own.
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    // ========================================================================
    // Rota Queries
    // ========================================================================

    /// Retrieves a single entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` if the entry does not exist.
    pub fn get_entry(&mut self, entry_id: EntryId) -> Result<RotaEntry, PersistenceError> {
        queries::entries::get_entry(&mut self.conn, entry_id)
    }

    /// Retrieves the entries with the given IDs. Unknown IDs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries_by_ids(
        &mut self,
        entry_ids: &[EntryId],
    ) -> Result<Vec<RotaEntry>, PersistenceError> {
        queries::entries::entries_by_ids(&mut self.conn, entry_ids)
    }

    /// Retrieves one carer's entries within `[from, to]`.
    ///
    /// # Arguments
    ///
    /// * `carer_id` - The carer
    /// * `from` - First date, inclusive
    /// * `to` - Last date, inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries_for_carer(
        &mut self,
        carer_id: CarerId,
        from: Date,
        to: Date,
    ) -> Result<Vec<RotaEntry>, PersistenceError> {
        queries::entries::entries_for_carer(&mut self.conn, carer_id, from, to)
    }

    /// Retrieves every carer's entries within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries_in_range(
        &mut self,
        from: Date,
        to: Date,
    ) -> Result<Vec<RotaEntry>, PersistenceError> {
        queries::entries::entries_in_range(&mut self.conn, from, to)
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves audit events in order, optionally scoped to one carer.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn audit_timeline(
        &mut self,
        carer_id: Option<CarerId>,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::audit_timeline(&mut self.conn, carer_id)
    }
}
