// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack::{RotaMutation, TransitionResult};
use caretrack_domain::EntryId;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::entries::{delete_entries, insert_entries, set_confirmation};

/// Identifiers assigned while persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The audit event's id.
    pub event_id: i64,
    /// Ids of inserted entries, in insertion order. Empty for updates and deletes.
    pub entry_ids: Vec<EntryId>,
}

/// Applies a transition's storage mutation and records its audit event.
///
/// Both happen in one transaction: either the rota change and its audit
/// event are stored together, or neither is.
///
/// # Errors
///
/// Returns an error if any statement fails, or if a confirmation or delete
/// targets an entry that no longer exists.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction::<PersistTransitionResult, PersistenceError, _>(|conn| {
        let entry_ids: Vec<EntryId> = match &result.mutation {
            RotaMutation::Insert(entries) => insert_entries(conn, entries)?,
            RotaMutation::SetConfirmation {
                entry_id,
                confirmed,
            } => {
                set_confirmation(conn, *entry_id, *confirmed)?;
                Vec::new()
            }
            RotaMutation::Delete(ids) => {
                let deleted: usize = delete_entries(conn, ids)?;
                if deleted != ids.len() {
                    return Err(PersistenceError::PartialDelete {
                        requested: ids.len(),
                        deleted,
                    });
                }
                Vec::new()
            }
        };

        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;

        info!(
            event_id,
            action = %result.audit_event.action.name,
            inserted = entry_ids.len(),
            "Persisted transition"
        );

        Ok(PersistTransitionResult {
            event_id,
            entry_ids,
        })
    })
}
