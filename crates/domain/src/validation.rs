// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rules::RuleSet;
use crate::types::{RotaEntry, RuleViolation, Severity};

/// Violations for one candidate, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Blocking violations (`error`).
    pub violations: Vec<RuleViolation>,
    /// Advisory violations (`warning`).
    pub warnings: Vec<RuleViolation>,
}

impl ValidationOutcome {
    /// Partitions a violation list by severity, preserving order.
    #[must_use]
    pub fn from_violations(all: Vec<RuleViolation>) -> Self {
        let (violations, warnings): (Vec<RuleViolation>, Vec<RuleViolation>) = all
            .into_iter()
            .partition(|v| matches!(v.severity, Severity::Error));
        Self {
            violations,
            warnings,
        }
    }

    /// Returns whether the write must be refused.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns whether nothing at all was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.warnings.is_empty()
    }
}

/// Validates one candidate entry against the existing schedule.
///
/// This function is pure and deterministic: the same input always produces
/// the same violations in the same order.
///
/// # Arguments
///
/// * `candidate` - The entry to be written
/// * `existing` - The authoritative entries for the candidate's carer and
///   validation window (see [`crate::RotaRuleConfig::validation_window`])
/// * `rules` - The rules to run, in order
///
/// # Returns
///
/// A [`ValidationOutcome`]. When [`ValidationOutcome::is_blocked`] is true the
/// caller must not persist the candidate.
#[must_use]
pub fn validate(candidate: &RotaEntry, existing: &[RotaEntry], rules: &RuleSet) -> ValidationOutcome {
    ValidationOutcome::from_violations(rules.evaluate(candidate, existing))
}

/// A batch candidate that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position of the candidate in the submitted batch.
    pub index: usize,
    /// The rejected candidate.
    pub entry: RotaEntry,
    /// The blocking violations.
    pub violations: Vec<RuleViolation>,
}

/// The result of validating a batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Candidates that passed, in submission order.
    pub accepted: Vec<RotaEntry>,
    /// Candidates that failed, in submission order.
    pub rejected: Vec<RejectedEntry>,
    /// Warnings raised for accepted candidates.
    pub warnings: Vec<RuleViolation>,
}

impl BatchOutcome {
    /// Returns whether every candidate was accepted.
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validates a batch of candidates in submission order.
///
/// Each candidate is checked against `existing` plus every earlier candidate
/// that was accepted. An accepted candidate is never revisited, so a later
/// candidate cannot invalidate an earlier one.
#[must_use]
pub fn validate_batch(
    candidates: &[RotaEntry],
    existing: &[RotaEntry],
    rules: &RuleSet,
) -> BatchOutcome {
    let mut working: Vec<RotaEntry> = existing.to_vec();
    let mut outcome: BatchOutcome = BatchOutcome::default();

    for (index, candidate) in candidates.iter().enumerate() {
        let result: ValidationOutcome = validate(candidate, &working, rules);

        if result.is_blocked() {
            outcome.rejected.push(RejectedEntry {
                index,
                entry: candidate.clone(),
                violations: result.violations,
            });
            continue;
        }

        outcome.warnings.extend(result.warnings);
        working.push(candidate.clone());
        outcome.accepted.push(candidate.clone());
    }

    outcome
}
