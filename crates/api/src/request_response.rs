// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates are `YYYY-MM-DD` strings, times `HH:MM` strings and shift types
//! `DAY` or `NIGHT`. These DTOs are distinct from domain types and are
//! parsed explicitly by the handlers.

use caretrack_audit::AuditEvent;
use caretrack_domain::{EntryId, EntryViolation, RotaEntry, RuleViolation, WeeklyScheduleSummary};
use serde::{Deserialize, Serialize};

/// A rota entry as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaEntryInput {
    /// The carer being scheduled.
    pub carer_id: i64,
    /// The care package the shift belongs to.
    pub package_id: i64,
    /// Shift date (`YYYY-MM-DD`).
    pub date: String,
    /// `DAY` or `NIGHT`.
    pub shift_type: String,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`). Earlier than start for overnight shifts.
    pub end_time: String,
}

/// A stored rota entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaEntryInfo {
    /// The stored entry identifier.
    pub entry_id: i64,
    /// The carer.
    pub carer_id: i64,
    /// The care package.
    pub package_id: i64,
    /// Shift date.
    pub date: String,
    /// `DAY` or `NIGHT`.
    pub shift_type: String,
    /// Start time.
    pub start_time: String,
    /// End time.
    pub end_time: String,
    /// Whether the shift has been confirmed.
    pub is_confirmed: bool,
    /// Who created the entry.
    pub created_by: String,
}

impl RotaEntryInfo {
    /// Builds the DTO for an entry stored under `entry_id`.
    #[must_use]
    pub fn new(entry_id: EntryId, entry: &RotaEntry) -> Self {
        Self {
            entry_id: entry_id.value(),
            carer_id: entry.carer_id.value(),
            package_id: entry.package_id.value(),
            date: entry.date.to_string(),
            shift_type: entry.shift_type.to_string(),
            start_time: entry.start_time.to_string(),
            end_time: entry.end_time.to_string(),
            is_confirmed: entry.is_confirmed,
            created_by: entry.created_by.clone(),
        }
    }
}

/// One rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationInfo {
    /// Rule identifier, e.g. `WEEKLY_HOUR_LIMIT`.
    pub rule: String,
    /// Human-readable message.
    pub message: String,
    /// `error` or `warning`.
    pub severity: String,
}

impl From<&RuleViolation> for ViolationInfo {
    fn from(violation: &RuleViolation) -> Self {
        Self {
            rule: violation.rule.as_str().to_string(),
            message: violation.message.clone(),
            severity: violation.severity.as_str().to_string(),
        }
    }
}

/// Converts a list of domain violations into DTOs.
#[must_use]
pub fn violation_infos(violations: &[RuleViolation]) -> Vec<ViolationInfo> {
    violations.iter().map(ViolationInfo::from).collect()
}

/// A violation attached to a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryViolationInfo {
    /// The stored entry the violation was computed for.
    pub entry_id: Option<i64>,
    /// The carer.
    pub carer_id: i64,
    /// The entry's date.
    pub date: String,
    /// The entry's shift type.
    pub shift_type: String,
    /// The violation.
    pub violation: ViolationInfo,
}

impl From<&EntryViolation> for EntryViolationInfo {
    fn from(ev: &EntryViolation) -> Self {
        Self {
            entry_id: ev.entry_id.map(|id| id.value()),
            carer_id: ev.carer_id.value(),
            date: ev.date.to_string(),
            shift_type: ev.shift_type.to_string(),
            violation: ViolationInfo::from(&ev.violation),
        }
    }
}

/// API request to validate a candidate entry without saving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateEntryRequest {
    /// The candidate.
    pub entry: RotaEntryInput,
    /// When moving an existing entry, its identifier. The stored copy is
    /// then not counted against the candidate.
    #[serde(default)]
    pub entry_id: Option<i64>,
}

/// API response for a validation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateEntryResponse {
    /// Blocking violations.
    pub violations: Vec<ViolationInfo>,
    /// Advisory violations.
    pub warnings: Vec<ViolationInfo>,
    /// Whether a save would be refused.
    pub blocked: bool,
}

/// API request to create one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    /// The entry to create.
    pub entry: RotaEntryInput,
}

/// API response for a successful entry creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryResponse {
    /// The stored entry.
    pub entry: RotaEntryInfo,
    /// Advisory violations raised by the entry.
    pub warnings: Vec<ViolationInfo>,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create many entries at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateEntriesRequest {
    /// Entries in the order they should be considered.
    pub entries: Vec<RotaEntryInput>,
}

/// A batch item the write guard refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntryInfo {
    /// Position in the request.
    pub index: usize,
    /// The refused input.
    pub entry: RotaEntryInput,
    /// The blocking violations.
    pub violations: Vec<ViolationInfo>,
}

/// API response for a bulk creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCreateEntriesResponse {
    /// Entries that were stored.
    pub created: Vec<RotaEntryInfo>,
    /// Entries that were refused.
    pub rejected: Vec<RejectedEntryInfo>,
    /// Advisory violations raised by stored entries.
    pub warnings: Vec<ViolationInfo>,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A summary message.
    pub message: String,
}

/// API request to confirm or unconfirm an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfirmationRequest {
    /// The stored entry.
    pub entry_id: i64,
    /// The new confirmation flag.
    pub confirmed: bool,
}

/// API response for a confirmation change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfirmationResponse {
    /// The updated entry.
    pub entry: RotaEntryInfo,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to delete entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEntriesRequest {
    /// Entries to delete.
    pub entry_ids: Vec<i64>,
}

/// API response for a batch delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEntriesResponse {
    /// Number of entries deleted.
    pub deleted: usize,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// Weekly totals and violations for one carer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummaryInfo {
    /// The carer.
    pub carer_id: i64,
    /// Monday of the week.
    pub week_start: String,
    /// Sunday of the week.
    pub week_end: String,
    /// Total scheduled hours.
    pub total_hours: f64,
    /// DAY shift count.
    pub day_shifts: u32,
    /// NIGHT shift count.
    pub night_shifts: u32,
    /// Violations raised by entries in the week.
    pub violations: Vec<EntryViolationInfo>,
}

impl From<&WeeklyScheduleSummary> for WeeklySummaryInfo {
    fn from(summary: &WeeklyScheduleSummary) -> Self {
        Self {
            carer_id: summary.carer_id.value(),
            week_start: summary.week_start.to_string(),
            week_end: summary.week_end.to_string(),
            total_hours: summary.total_hours,
            day_shifts: summary.day_shifts,
            night_shifts: summary.night_shifts,
            violations: summary
                .violations
                .iter()
                .map(EntryViolationInfo::from)
                .collect(),
        }
    }
}

/// API response for the week grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetWeekScheduleResponse {
    /// Monday of the week.
    pub week_start: String,
    /// Sunday of the week.
    pub week_end: String,
    /// Every entry dated in the week.
    pub entries: Vec<RotaEntryInfo>,
    /// One summary per carer with entries in the week.
    pub summaries: Vec<WeeklySummaryInfo>,
}

/// API request to check competency coverage for a package shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckShiftCoverageRequest {
    /// The package being staffed.
    pub package_id: i64,
    /// Shift date.
    pub date: String,
    /// `DAY` or `NIGHT`.
    pub shift_type: String,
    /// Carers assigned to the shift.
    pub assigned: Vec<i64>,
    /// Carers competent for every task the package requires.
    pub competent: Vec<i64>,
}

/// API response for a coverage check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckShiftCoverageResponse {
    /// Assigned carers who are competent.
    pub competent_count: usize,
    /// The configured minimum.
    pub minimum: u32,
    /// Advisory violations.
    pub warnings: Vec<ViolationInfo>,
}

/// One audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The persisted identifier.
    pub event_id: Option<i64>,
    /// Who made the change.
    pub actor_id: String,
    /// Kind of actor.
    pub actor_type: String,
    /// Why the change was made.
    pub cause_id: String,
    /// Description of the cause.
    pub cause_description: String,
    /// Action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// Snapshot before the change.
    pub before: String,
    /// Snapshot after the change.
    pub after: String,
    /// The carer the event is scoped to.
    pub carer_id: Option<i64>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            carer_id: event.carer_id.map(|c| c.value()),
        }
    }
}

/// API response for the audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAuditTimelineResponse {
    /// The carer filter, if any.
    pub carer_id: Option<i64>,
    /// Events in order.
    pub events: Vec<AuditEventInfo>,
}
