// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_audit::{AuditEvent, StateSnapshot};
use caretrack_domain::{
    CarerId, EntryId, RejectedEntry, RotaEntry, RuleViolation, format_hours, minutes_to_hours,
    shift_minutes,
};

/// The authoritative rota entries a transition is validated against.
///
/// Loaded by the caller for the affected carer(s) and date window. A
/// transition only sees what is loaded here, so the window must cover
/// everything the rules can look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotaState {
    /// The loaded entries.
    pub entries: Vec<RotaEntry>,
}

impl RotaState {
    /// Creates a state from loaded entries.
    #[must_use]
    pub const fn new(entries: Vec<RotaEntry>) -> Self {
        Self { entries }
    }

    /// Finds a stored entry by identifier.
    #[must_use]
    pub fn entry(&self, entry_id: EntryId) -> Option<&RotaEntry> {
        self.entries.iter().find(|e| e.id == Some(entry_id))
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let minutes: u32 = self.entries.iter().map(shift_minutes).sum();
        StateSnapshot::new(format!(
            "entries={},hours={}",
            self.entries.len(),
            format_hours(minutes_to_hours(minutes))
        ))
    }

    /// Converts one carer's slice of the state to a snapshot.
    #[must_use]
    pub fn to_carer_snapshot(&self, carer_id: CarerId) -> StateSnapshot {
        let mine: Vec<&RotaEntry> = self
            .entries
            .iter()
            .filter(|e| e.carer_id == carer_id)
            .collect();
        let minutes: u32 = mine.iter().map(|e| shift_minutes(e)).sum();
        StateSnapshot::new(format!(
            "carer_id={carer_id},entries={},hours={}",
            mine.len(),
            format_hours(minutes_to_hours(minutes))
        ))
    }
}

/// The storage change a transition requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotaMutation {
    /// Insert new entries. Identifiers are assigned by storage.
    Insert(Vec<RotaEntry>),
    /// Update one entry's confirmation flag.
    SetConfirmation {
        /// The stored entry.
        entry_id: EntryId,
        /// The new flag value.
        confirmed: bool,
    },
    /// Hard-delete entries.
    Delete(Vec<EntryId>),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: RotaState,
    /// The change storage must apply.
    pub mutation: RotaMutation,
    /// Advisory violations raised by accepted entries.
    pub warnings: Vec<RuleViolation>,
    /// Batch items refused by the write guard.
    pub rejected: Vec<RejectedEntry>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
