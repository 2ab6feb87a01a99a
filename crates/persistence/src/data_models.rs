// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use caretrack_audit::{Action, Actor, Cause, StateSnapshot};
use caretrack_domain::{
    CarerId, DomainError, EntryId, PackageId, RotaEntry, ShiftTime, ShiftType, parse_date,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::diesel_schema::rota_entries;
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

/// Insertable rota entry row.
#[derive(Debug, Insertable)]
#[diesel(table_name = rota_entries)]
pub struct NewRotaEntry<'a> {
    pub carer_id: i64,
    pub package_id: i64,
    pub entry_date: String,
    pub shift_type: &'static str,
    pub start_time: String,
    pub end_time: String,
    pub is_confirmed: i32,
    pub created_by: &'a str,
}

impl<'a> From<&'a RotaEntry> for NewRotaEntry<'a> {
    fn from(entry: &'a RotaEntry) -> Self {
        Self {
            carer_id: entry.carer_id.value(),
            package_id: entry.package_id.value(),
            entry_date: entry.date.to_string(),
            shift_type: entry.shift_type.as_str(),
            start_time: entry.start_time.to_string(),
            end_time: entry.end_time.to_string(),
            is_confirmed: i32::from(entry.is_confirmed),
            created_by: &entry.created_by,
        }
    }
}

/// A stored rota entry row.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = rota_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RotaEntryRow {
    pub entry_id: i64,
    pub carer_id: i64,
    pub package_id: i64,
    pub entry_date: String,
    pub shift_type: String,
    pub start_time: String,
    pub end_time: String,
    pub is_confirmed: i32,
    pub created_by: String,
    pub created_at: String,
}

/// Parses `SQLite`'s `CURRENT_TIMESTAMP` text, which is always UTC.
fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

impl TryFrom<RotaEntryRow> for RotaEntry {
    type Error = PersistenceError;

    fn try_from(row: RotaEntryRow) -> Result<Self, Self::Error> {
        let entry_id: i64 = row.entry_id;
        let reconstruct = |e: DomainError| {
            PersistenceError::ReconstructionError(format!("rota entry {entry_id}: {e}"))
        };

        let carer_id: CarerId = CarerId::new(row.carer_id).map_err(reconstruct)?;
        let package_id: PackageId = PackageId::new(row.package_id).map_err(reconstruct)?;
        let date = parse_date(&row.entry_date).map_err(reconstruct)?;
        let shift_type: ShiftType = row.shift_type.parse().map_err(reconstruct)?;
        let start_time: ShiftTime = ShiftTime::parse(&row.start_time).map_err(reconstruct)?;
        let end_time: ShiftTime = ShiftTime::parse(&row.end_time).map_err(reconstruct)?;

        let mut entry: Self =
            Self::new(carer_id, package_id, date, shift_type, start_time, end_time)
                .with_id(EntryId::new(entry_id))
                .with_created_by(row.created_by);
        entry.is_confirmed = row.is_confirmed != 0;
        entry.created_at = parse_timestamp(&row.created_at);
        Ok(entry)
    }
}
