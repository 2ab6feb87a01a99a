// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_domain::{DomainError, EntryId, RuleViolation};

/// Errors that can occur during rota state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An input value was malformed.
    DomainViolation(DomainError),
    /// The write guard refused the change.
    ///
    /// Carries every blocking violation plus any warnings raised alongside.
    ScheduleViolations {
        /// Blocking violations.
        violations: Vec<RuleViolation>,
        /// Advisory violations.
        warnings: Vec<RuleViolation>,
    },
    /// A referenced entry is not in the loaded rota state.
    EntryNotFound(EntryId),
    /// A batch command carried no items.
    EmptyBatch,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ScheduleViolations { violations, .. } => {
                let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
                write!(
                    f,
                    "Schedule rule violation ({}): {}",
                    violations.len(),
                    messages.join("; ")
                )
            }
            Self::EntryNotFound(id) => write!(f, "Rota entry {id} not found"),
            Self::EmptyBatch => write!(f, "Batch contains no items"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
