// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every write follows the same sequence: load the entry window the rules
//! need, run `apply` against it, then persist the transition. Callers must
//! hold exclusive access to the persistence adapter for the whole call so
//! that validation and the write see the same rows.

use caretrack::{Command, RotaMutation, RotaState, TransitionResult, apply};
use caretrack_audit::{Actor, AuditEvent, Cause};
use caretrack_domain::{
    CarerId, EntryId, PackageId, RotaEntry, RotaRuleConfig, RuleSet, RuleViolation, ShiftCoverage,
    ShiftTime, ShiftType, ValidationOutcome, WeeklyScheduleSummary, check_competent_coverage, parse_date,
    summarize, summarize_week, validate, week_end, week_start,
};
use caretrack_persistence::{PersistTransitionResult, Persistence};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AuditEventInfo, BulkCreateEntriesRequest, BulkCreateEntriesResponse,
    CheckShiftCoverageRequest, CheckShiftCoverageResponse, CreateEntryRequest,
    CreateEntryResponse, DeleteEntriesRequest, DeleteEntriesResponse, GetAuditTimelineResponse,
    GetWeekScheduleResponse, RejectedEntryInfo, RotaEntryInfo, RotaEntryInput,
    SetConfirmationRequest, SetConfirmationResponse, ValidateEntryRequest, ValidateEntryResponse,
    WeeklySummaryInfo, violation_infos,
};

/// Parses a `YYYY-MM-DD` request field.
fn parse_request_date(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(translate_domain_error)
}

fn parse_carer_id(value: i64) -> Result<CarerId, ApiError> {
    CarerId::new(value).map_err(translate_domain_error)
}

/// Builds a candidate entry from client input.
///
/// # Errors
///
/// Returns `InvalidInput` if any field is malformed.
fn parse_entry(input: &RotaEntryInput, created_by: &str) -> Result<RotaEntry, ApiError> {
    let carer_id: CarerId = parse_carer_id(input.carer_id)?;
    let package_id: PackageId = PackageId::new(input.package_id).map_err(translate_domain_error)?;
    let date: Date = parse_request_date(&input.date)?;
    let shift_type: ShiftType = input.shift_type.parse().map_err(translate_domain_error)?;
    let start_time: ShiftTime = ShiftTime::parse(&input.start_time).map_err(|e| {
        relabel(translate_domain_error(e), "start_time")
    })?;
    let end_time: ShiftTime = ShiftTime::parse(&input.end_time).map_err(|e| {
        relabel(translate_domain_error(e), "end_time")
    })?;

    Ok(
        RotaEntry::new(carer_id, package_id, date, shift_type, start_time, end_time)
            .with_created_by(created_by),
    )
}

/// Points an input error at a specific field.
fn relabel(err: ApiError, field: &str) -> ApiError {
    match err {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    }
}

/// Loads every stored entry the rules can depend on for `entries`.
///
/// The window is the union of each candidate's validation window.
fn load_window_for(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    entries: &[RotaEntry],
) -> Result<Vec<RotaEntry>, ApiError> {
    let windows: Vec<(Date, Date)> = entries
        .iter()
        .map(|e| config.validation_window(e.date))
        .collect();
    let (Some(from), Some(to)) = (
        windows.iter().map(|(from, _)| *from).min(),
        windows.iter().map(|(_, to)| *to).max(),
    ) else {
        return Ok(Vec::new());
    };

    debug!(%from, %to, candidates = entries.len(), "Loading validation window");
    Ok(persistence.entries_in_range(from, to)?)
}

/// Persists a transition, mapping storage failures.
fn persist(
    persistence: &mut Persistence,
    transition: &TransitionResult,
) -> Result<PersistTransitionResult, ApiError> {
    let result: PersistTransitionResult = persistence.persist_transition(transition)?;
    info!(
        event_id = result.event_id,
        action = %transition.audit_event.action.name,
        warnings = transition.warnings.len(),
        "Rota change persisted"
    );
    Ok(result)
}

/// Validates a candidate entry against the saved rota without writing.
///
/// When `entry_id` is set the candidate is treated as a move of that stored
/// entry, so its current position is not counted against it.
///
/// # Errors
///
/// Returns an error if the input is malformed or the rota cannot be read.
pub fn validate_entry(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    request: &ValidateEntryRequest,
) -> Result<ValidateEntryResponse, ApiError> {
    let mut candidate: RotaEntry = parse_entry(&request.entry, "")?;
    if let Some(entry_id) = request.entry_id {
        candidate = candidate.with_id(EntryId::new(entry_id));
    }

    let (from, to) = config.validation_window(candidate.date);
    let existing: Vec<RotaEntry> = persistence.entries_for_carer(candidate.carer_id, from, to)?;

    let rules: RuleSet = RuleSet::standard(config);
    let outcome: ValidationOutcome = validate(&candidate, &existing, &rules);

    debug!(
        carer_id = candidate.carer_id.value(),
        date = %candidate.date,
        violations = outcome.violations.len(),
        warnings = outcome.warnings.len(),
        "Validated candidate entry"
    );

    Ok(ValidateEntryResponse {
        blocked: outcome.is_blocked(),
        violations: violation_infos(&outcome.violations),
        warnings: violation_infos(&outcome.warnings),
    })
}

/// Creates a single rota entry.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `config` - Rule configuration
/// * `request` - The entry to create
/// * `actor` - Who is making the change
/// * `cause` - Why the change is being made
///
/// # Errors
///
/// Returns `ScheduleViolation` with the full violation list if the write
/// guard refuses the entry, or another error if input or storage fails.
pub fn create_entry(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    request: &CreateEntryRequest,
    actor: Actor,
    cause: Cause,
) -> Result<CreateEntryResponse, ApiError> {
    let entry: RotaEntry = parse_entry(&request.entry, &actor.id)?;
    let (from, to) = config.validation_window(entry.date);
    let state: RotaState = RotaState::new(persistence.entries_for_carer(entry.carer_id, from, to)?);

    let transition: TransitionResult = apply(
        &state,
        Command::CreateEntry {
            entry: entry.clone(),
        },
        actor,
        cause,
        &RuleSet::standard(config),
    )
    .map_err(|e| {
        warn!(carer_id = entry.carer_id.value(), date = %entry.date, error = %e, "Entry refused");
        translate_core_error(e)
    })?;

    let result: PersistTransitionResult = persist(persistence, &transition)?;
    let entry_id: EntryId = result
        .entry_ids
        .first()
        .copied()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Entry was persisted without an identifier"),
        })?;

    Ok(CreateEntryResponse {
        entry: RotaEntryInfo::new(entry_id, &entry),
        warnings: violation_infos(&transition.warnings),
        event_id: result.event_id,
        message: format!("Created entry {entry_id}"),
    })
}

/// Creates many rota entries in request order.
///
/// Each item is validated against the saved rota plus the items accepted
/// before it. Refused items are reported and skipped.
///
/// # Errors
///
/// Returns an error if the batch is empty, any item is malformed, every item
/// is refused, or storage fails.
pub fn bulk_create_entries(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    request: &BulkCreateEntriesRequest,
    actor: Actor,
    cause: Cause,
) -> Result<BulkCreateEntriesResponse, ApiError> {
    let entries: Vec<RotaEntry> = request
        .entries
        .iter()
        .map(|input| parse_entry(input, &actor.id))
        .collect::<Result<Vec<RotaEntry>, ApiError>>()?;

    let state: RotaState = RotaState::new(load_window_for(persistence, config, &entries)?);

    let transition: TransitionResult = apply(
        &state,
        Command::BulkCreateEntries { entries },
        actor,
        cause,
        &RuleSet::standard(config),
    )
    .map_err(translate_core_error)?;

    let result: PersistTransitionResult = persist(persistence, &transition)?;

    let created: Vec<RotaEntryInfo> = match &transition.mutation {
        RotaMutation::Insert(inserted) => result
            .entry_ids
            .iter()
            .zip(inserted)
            .map(|(id, entry)| RotaEntryInfo::new(*id, entry))
            .collect(),
        RotaMutation::SetConfirmation { .. } | RotaMutation::Delete(_) => Vec::new(),
    };

    let rejected: Vec<RejectedEntryInfo> = transition
        .rejected
        .iter()
        .filter_map(|r| {
            request.entries.get(r.index).map(|input| RejectedEntryInfo {
                index: r.index,
                entry: input.clone(),
                violations: violation_infos(&r.violations),
            })
        })
        .collect();

    if !rejected.is_empty() {
        warn!(
            requested = request.entries.len(),
            rejected = rejected.len(),
            "Bulk create refused some entries"
        );
    }

    Ok(BulkCreateEntriesResponse {
        message: format!(
            "Created {} of {} entries",
            created.len(),
            request.entries.len()
        ),
        created,
        rejected,
        warnings: violation_infos(&transition.warnings),
        event_id: result.event_id,
    })
}

/// Confirms or unconfirms a stored entry.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry does not exist.
pub fn set_confirmation(
    persistence: &mut Persistence,
    request: &SetConfirmationRequest,
    actor: Actor,
    cause: Cause,
) -> Result<SetConfirmationResponse, ApiError> {
    let entry_id: EntryId = EntryId::new(request.entry_id);
    let state: RotaState = RotaState::new(vec![persistence.get_entry(entry_id)?]);

    let transition: TransitionResult = apply(
        &state,
        Command::SetConfirmation {
            entry_id,
            confirmed: request.confirmed,
        },
        actor,
        cause,
        &RuleSet::default(),
    )
    .map_err(translate_core_error)?;

    let result: PersistTransitionResult = persist(persistence, &transition)?;
    let updated: &RotaEntry = transition
        .new_state
        .entry(entry_id)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Entry {entry_id} missing from transition state"),
        })?;

    Ok(SetConfirmationResponse {
        entry: RotaEntryInfo::new(entry_id, updated),
        event_id: result.event_id,
        message: format!(
            "Entry {entry_id} {}",
            if request.confirmed {
                "confirmed"
            } else {
                "unconfirmed"
            }
        ),
    })
}

/// Hard-deletes stored entries.
///
/// The delete is all or nothing: if any id is unknown nothing is removed.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id, or `InvalidInput` for an
/// empty request.
pub fn delete_entries(
    persistence: &mut Persistence,
    request: &DeleteEntriesRequest,
    actor: Actor,
    cause: Cause,
) -> Result<DeleteEntriesResponse, ApiError> {
    let mut entry_ids: Vec<EntryId> = request.entry_ids.iter().copied().map(EntryId::new).collect();
    entry_ids.sort_unstable();
    entry_ids.dedup();
    let state: RotaState = RotaState::new(persistence.entries_by_ids(&entry_ids)?);

    let transition: TransitionResult = apply(
        &state,
        Command::DeleteEntries {
            entry_ids: entry_ids.clone(),
        },
        actor,
        cause,
        &RuleSet::default(),
    )
    .map_err(translate_core_error)?;

    let result: PersistTransitionResult = persist(persistence, &transition)?;

    Ok(DeleteEntriesResponse {
        deleted: entry_ids.len(),
        event_id: result.event_id,
        message: format!("Deleted {} entries", entry_ids.len()),
    })
}

/// Summarizes one carer's week.
///
/// # Arguments
///
/// * `carer_id` - The carer
/// * `week_of` - Any date in the week (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns an error if the input is malformed or the rota cannot be read.
pub fn get_weekly_summary(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    carer_id: i64,
    week_of: &str,
) -> Result<WeeklySummaryInfo, ApiError> {
    let carer: CarerId = parse_carer_id(carer_id)?;
    let monday: Date = week_start(parse_request_date(week_of)?);
    let (from, to) = config.summary_window(monday);

    let entries: Vec<RotaEntry> = persistence.entries_for_carer(carer, from, to)?;
    let summary: WeeklyScheduleSummary =
        summarize(carer, monday, &entries, &RuleSet::standard(config));

    Ok(WeeklySummaryInfo::from(&summary))
}

/// Returns the week grid: every entry in the week and a summary per carer.
///
/// # Errors
///
/// Returns an error if the date is malformed or the rota cannot be read.
pub fn get_week_schedule(
    persistence: &mut Persistence,
    config: &RotaRuleConfig,
    week_of: &str,
) -> Result<GetWeekScheduleResponse, ApiError> {
    let monday: Date = week_start(parse_request_date(week_of)?);
    let sunday: Date = week_end(monday);
    let (from, to) = config.summary_window(monday);

    let entries: Vec<RotaEntry> = persistence.entries_in_range(from, to)?;
    let summaries: Vec<WeeklyScheduleSummary> =
        summarize_week(monday, &entries, &RuleSet::standard(config));

    let in_week: Vec<RotaEntryInfo> = entries
        .iter()
        .filter(|e| e.date >= monday && e.date <= sunday)
        .filter_map(|e| e.id.map(|id| RotaEntryInfo::new(id, e)))
        .collect();

    Ok(GetWeekScheduleResponse {
        week_start: monday.to_string(),
        week_end: sunday.to_string(),
        entries: in_week,
        summaries: summaries.iter().map(WeeklySummaryInfo::from).collect(),
    })
}

/// Checks that a package shift has enough competent carers assigned.
///
/// # Errors
///
/// Returns `InvalidInput` if any field is malformed.
pub fn check_shift_coverage(
    config: &RotaRuleConfig,
    request: &CheckShiftCoverageRequest,
) -> Result<CheckShiftCoverageResponse, ApiError> {
    let shift: ShiftCoverage = ShiftCoverage {
        package_id: PackageId::new(request.package_id).map_err(translate_domain_error)?,
        date: parse_request_date(&request.date)?,
        shift_type: request.shift_type.parse().map_err(translate_domain_error)?,
        assigned: request
            .assigned
            .iter()
            .map(|id| parse_carer_id(*id))
            .collect::<Result<Vec<CarerId>, ApiError>>()?,
        competent: request
            .competent
            .iter()
            .map(|id| parse_carer_id(*id))
            .collect::<Result<Vec<CarerId>, ApiError>>()?,
    };

    let warnings: Vec<RuleViolation> = check_competent_coverage(&shift, config.min_competent_staff);

    Ok(CheckShiftCoverageResponse {
        competent_count: shift.competent_count(),
        minimum: config.min_competent_staff,
        warnings: violation_infos(&warnings),
    })
}

/// Returns the audit timeline, optionally for one carer.
///
/// # Errors
///
/// Returns an error if the timeline cannot be read.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    carer_id: Option<i64>,
) -> Result<GetAuditTimelineResponse, ApiError> {
    let carer: Option<CarerId> = carer_id.map(parse_carer_id).transpose()?;
    let events: Vec<AuditEvent> = persistence.audit_timeline(carer)?;

    Ok(GetAuditTimelineResponse {
        carer_id,
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}
