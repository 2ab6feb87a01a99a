// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{RotaMutation, RotaState, TransitionResult};
use caretrack_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use caretrack_domain::{
    BatchOutcome, CarerId, EntryId, RotaEntry, RuleSet, RuleViolation, ValidationOutcome,
    validate, validate_batch,
};

/// Returns the single carer shared by `entries`, if there is exactly one.
fn single_carer<'a>(entries: impl IntoIterator<Item = &'a RotaEntry>) -> Option<CarerId> {
    let mut iter = entries.into_iter().map(|e| e.carer_id);
    let first: CarerId = iter.next()?;
    iter.all(|c| c == first).then_some(first)
}

/// Builds the audit event, scoped to a carer when the change touches only one.
fn audit_event(
    actor: Actor,
    cause: Cause,
    action: Action,
    before: &RotaState,
    after: &RotaState,
    carer: Option<CarerId>,
) -> AuditEvent {
    let (before_snapshot, after_snapshot): (StateSnapshot, StateSnapshot) = match carer {
        Some(carer_id) => (
            before.to_carer_snapshot(carer_id),
            after.to_carer_snapshot(carer_id),
        ),
        None => (before.to_snapshot(), after.to_snapshot()),
    };

    let event: AuditEvent = AuditEvent::new(actor, cause, action, before_snapshot, after_snapshot);
    match carer {
        Some(carer_id) => event.for_carer(carer_id),
        None => event,
    }
}

fn describe(entry: &RotaEntry) -> String {
    format!(
        "{} shift {}-{} on {} for carer {} (package {})",
        entry.shift_type,
        entry.start_time,
        entry.end_time,
        entry.date,
        entry.carer_id,
        entry.package_id
    )
}

/// Applies a command to the loaded rota, producing a new state and audit event.
///
/// Creation commands run the rule set against `state` and refuse to produce
/// a transition for any entry with a blocking violation. Confirmation and
/// deletion never re-run the rules.
///
/// # Arguments
///
/// * `state` - The authoritative entries for the affected carer(s) and window
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `rules` - The scheduling rules guarding writes
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, the storage mutation,
///   any warnings and rejected batch items, and exactly one audit event
/// * `Err(CoreError)` if nothing can be written
///
/// # Errors
///
/// Returns an error if:
/// - A single entry has a blocking violation
/// - Every entry of a batch has a blocking violation
/// - A batch command is empty
/// - A referenced entry is not in `state`
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &RotaState,
    command: Command,
    actor: Actor,
    cause: Cause,
    rules: &RuleSet,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.action_name();

    match command {
        Command::CreateEntry { entry } => {
            let outcome: ValidationOutcome = validate(&entry, &state.entries, rules);
            if outcome.is_blocked() {
                return Err(CoreError::ScheduleViolations {
                    violations: outcome.violations,
                    warnings: outcome.warnings,
                });
            }

            let action: Action = Action::new(String::from(action_name), Some(describe(&entry)));
            let carer: CarerId = entry.carer_id;

            let mut new_state: RotaState = state.clone();
            new_state.entries.push(entry.clone());

            let audit_event: AuditEvent =
                audit_event(actor, cause, action, state, &new_state, Some(carer));

            Ok(TransitionResult {
                new_state,
                mutation: RotaMutation::Insert(vec![entry]),
                warnings: outcome.warnings,
                rejected: Vec::new(),
                audit_event,
            })
        }
        Command::BulkCreateEntries { entries } => {
            if entries.is_empty() {
                return Err(CoreError::EmptyBatch);
            }

            let outcome: BatchOutcome = validate_batch(&entries, &state.entries, rules);
            if outcome.accepted.is_empty() {
                let violations: Vec<RuleViolation> = outcome
                    .rejected
                    .into_iter()
                    .flat_map(|r| r.violations)
                    .collect();
                return Err(CoreError::ScheduleViolations {
                    violations,
                    warnings: outcome.warnings,
                });
            }

            let action: Action = Action::new(
                String::from(action_name),
                Some(format!(
                    "Created {} of {} entries ({} rejected)",
                    outcome.accepted.len(),
                    entries.len(),
                    outcome.rejected.len()
                )),
            );
            let carer: Option<CarerId> = single_carer(&outcome.accepted);

            let mut new_state: RotaState = state.clone();
            new_state.entries.extend(outcome.accepted.iter().cloned());

            let audit_event: AuditEvent =
                audit_event(actor, cause, action, state, &new_state, carer);

            Ok(TransitionResult {
                new_state,
                mutation: RotaMutation::Insert(outcome.accepted),
                warnings: outcome.warnings,
                rejected: outcome.rejected,
                audit_event,
            })
        }
        Command::SetConfirmation {
            entry_id,
            confirmed,
        } => {
            let existing: &RotaEntry = state
                .entry(entry_id)
                .ok_or(CoreError::EntryNotFound(entry_id))?;
            let carer: CarerId = existing.carer_id;

            let action: Action = Action::new(
                String::from(action_name),
                Some(format!(
                    "{} entry {entry_id}: {}",
                    if confirmed { "Confirmed" } else { "Unconfirmed" },
                    describe(existing)
                )),
            );

            let mut new_state: RotaState = state.clone();
            for entry in &mut new_state.entries {
                if entry.id == Some(entry_id) {
                    entry.is_confirmed = confirmed;
                }
            }

            let audit_event: AuditEvent =
                audit_event(actor, cause, action, state, &new_state, Some(carer));

            Ok(TransitionResult {
                new_state,
                mutation: RotaMutation::SetConfirmation {
                    entry_id,
                    confirmed,
                },
                warnings: Vec::new(),
                rejected: Vec::new(),
                audit_event,
            })
        }
        Command::DeleteEntries { entry_ids } => {
            if entry_ids.is_empty() {
                return Err(CoreError::EmptyBatch);
            }

            let mut removed: Vec<&RotaEntry> = Vec::with_capacity(entry_ids.len());
            for entry_id in &entry_ids {
                let entry: &RotaEntry = state
                    .entry(*entry_id)
                    .ok_or(CoreError::EntryNotFound(*entry_id))?;
                removed.push(entry);
            }
            let carer: Option<CarerId> = single_carer(removed.iter().copied());

            let ids: Vec<String> = entry_ids.iter().map(EntryId::to_string).collect();
            let action: Action = Action::new(
                String::from(action_name),
                Some(format!(
                    "Deleted {} entries: {}",
                    entry_ids.len(),
                    ids.join(", ")
                )),
            );

            let mut new_state: RotaState = state.clone();
            new_state
                .entries
                .retain(|e| e.id.is_none_or(|id| !entry_ids.contains(&id)));

            let audit_event: AuditEvent =
                audit_event(actor, cause, action, state, &new_state, carer);

            Ok(TransitionResult {
                new_state,
                mutation: RotaMutation::Delete(entry_ids),
                warnings: Vec::new(),
                rejected: Vec::new(),
                audit_event,
            })
        }
    }
}
