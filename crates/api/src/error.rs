// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use caretrack::CoreError;
use caretrack_domain::DomainError;
use caretrack_persistence::PersistenceError;
use thiserror::Error;

use crate::request_response::{ViolationInfo, violation_infos};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The write guard refused the change.
    #[error("Schedule rule violation: {}", join_messages(.violations))]
    ScheduleViolation {
        /// Blocking violations.
        violations: Vec<ViolationInfo>,
        /// Advisory violations raised alongside.
        warnings: Vec<ViolationInfo>,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

fn join_messages(violations: &[ViolationInfo]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<&str>>()
        .join("; ")
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidShiftTime(value) => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Invalid shift time '{value}': expected HH:MM"),
        },
        DomainError::InvalidShiftType(value) => ApiError::InvalidInput {
            field: String::from("shift_type"),
            message: format!("Invalid shift type '{value}': expected DAY or NIGHT"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidIdentifier { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid {field}: {value}. Must be greater than 0"),
        },
        DomainError::InvalidRuleConfig { field, reason } => ApiError::InvalidInput {
            field: field.to_string(),
            message: reason,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ScheduleViolations {
            violations,
            warnings,
        } => ApiError::ScheduleViolation {
            violations: violation_infos(&violations),
            warnings: violation_infos(&warnings),
        },
        CoreError::EntryNotFound(entry_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Rota entry"),
            message: format!("Rota entry {entry_id} does not exist"),
        },
        CoreError::EmptyBatch => ApiError::InvalidInput {
            field: String::from("batch"),
            message: String::from("At least one item is required"),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::EntryNotFound(entry_id) => Self::ResourceNotFound {
                resource_type: String::from("Rota entry"),
                message: format!("Rota entry {entry_id} does not exist"),
            },
            PersistenceError::EventNotFound(event_id) => Self::ResourceNotFound {
                resource_type: String::from("Audit event"),
                message: format!("Audit event {event_id} does not exist"),
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
