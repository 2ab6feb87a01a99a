// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_domain::{EntryId, RotaEntry};

/// A command represents operator intent as data only.
///
/// Commands are the only way to request rota changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a single shift (manual placement or drag/drop).
    CreateEntry {
        /// The unsaved entry.
        entry: RotaEntry,
    },
    /// Place several shifts at once, validated in order.
    BulkCreateEntries {
        /// The unsaved entries, in submission order.
        entries: Vec<RotaEntry>,
    },
    /// Toggle a stored shift's confirmation flag.
    SetConfirmation {
        /// The stored entry.
        entry_id: EntryId,
        /// The new flag value.
        confirmed: bool,
    },
    /// Hard-delete stored shifts.
    DeleteEntries {
        /// The stored entries to remove.
        entry_ids: Vec<EntryId>,
    },
}

impl Command {
    /// The action name recorded in the audit trail.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::CreateEntry { .. } => "CreateEntry",
            Self::BulkCreateEntries { .. } => "BulkCreateEntries",
            Self::SetConfirmation { .. } => "SetConfirmation",
            Self::DeleteEntries { .. } => "DeleteEntries",
        }
    }
}
