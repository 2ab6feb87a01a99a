// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competency coverage for dispatched shifts.
//!
//! This check belongs to shift dispatch, not the rota rule list. It raises
//! warnings only.

use crate::types::{CarerId, PackageId, RuleId, RuleViolation, ShiftType};
use std::collections::HashSet;
use time::Date;

/// The carers assigned to one package shift and which of them are
/// competent for the package's tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCoverage {
    /// The package being staffed.
    pub package_id: PackageId,
    /// The shift date.
    pub date: Date,
    /// DAY or NIGHT.
    pub shift_type: ShiftType,
    /// Carers assigned to the shift.
    pub assigned: Vec<CarerId>,
    /// Carers holding every competency the package requires.
    pub competent: Vec<CarerId>,
}

impl ShiftCoverage {
    /// Number of distinct assigned carers who are competent.
    #[must_use]
    pub fn competent_count(&self) -> usize {
        let competent: HashSet<&CarerId> = self.competent.iter().collect();
        self.assigned
            .iter()
            .collect::<HashSet<&CarerId>>()
            .into_iter()
            .filter(|c| competent.contains(c))
            .count()
    }
}

/// Checks that a shift has at least `minimum` competent carers assigned.
///
/// A `minimum` of zero disables the check.
#[must_use]
pub fn check_competent_coverage(shift: &ShiftCoverage, minimum: u32) -> Vec<RuleViolation> {
    let count: usize = shift.competent_count();
    let required: usize = usize::try_from(minimum).unwrap_or(usize::MAX);

    if count >= required {
        return Vec::new();
    }

    vec![RuleViolation::warning(
        RuleId::NoCompetentStaff,
        format!(
            "{} shift on {} for package {} has {count} competent carer(s) assigned, minimum is {minimum}",
            shift.shift_type, shift.date, shift.package_id
        ),
    )]
}
