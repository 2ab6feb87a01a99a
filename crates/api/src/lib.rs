// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for CareTrack rota scheduling.
//!
//! Handlers translate string-typed DTOs into domain values, run the core
//! state transitions against the rota loaded from persistence, and
//! translate every failure into an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    bulk_create_entries, check_shift_coverage, create_entry, delete_entries, get_audit_timeline,
    get_week_schedule, get_weekly_summary, set_confirmation, validate_entry,
};
pub use request_response::{
    AuditEventInfo, BulkCreateEntriesRequest, BulkCreateEntriesResponse,
    CheckShiftCoverageRequest, CheckShiftCoverageResponse, CreateEntryRequest,
    CreateEntryResponse, DeleteEntriesRequest, DeleteEntriesResponse, EntryViolationInfo,
    GetAuditTimelineResponse, GetWeekScheduleResponse, RejectedEntryInfo, RotaEntryInfo,
    RotaEntryInput, SetConfirmationRequest, SetConfirmationResponse, ValidateEntryRequest,
    ValidateEntryResponse, ViolationInfo, WeeklySummaryInfo, violation_infos,
};
