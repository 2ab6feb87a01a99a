// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The violation lifecycle for one weekly rota view.
//!
//! ## States
//!
//! - `Idle`: no recent violations are held
//! - `Active`: one or more recent violations are held and an auto-clear
//!   deadline is armed
//!
//! A new non-empty validation result replaces the recent set outright.
//! Recent violations leave through dismissal, auto-expiry, an empty
//! validation result, or [`ViolationTracker::dispose`]. Whenever the recent
//! set becomes empty the pending auto-clear is cancelled.
//!
//! Every read consults the clock, so a recent violation past its deadline
//! is gone from the view even if [`ViolationTracker::poll_expiry`] has not
//! run yet. Polling only reclaims the storage and disarms the deadline.
//!
//! Persistent violations come from the saved schedule and are never
//! removed by dismissal or expiry.

use crate::clock::{Clock, SystemClock};
use caretrack_domain::{CarerId, EntryId, RuleViolation, ShiftType, WeeklyScheduleSummary};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use time::Date;

/// Characters of the message that take part in violation identity.
const MESSAGE_KEY_CHARS: usize = 50;

/// Default time a recent violation stays visible.
pub const DEFAULT_AUTO_CLEAR_AFTER: Duration = Duration::from_secs(10);

/// Tracker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// How long recent violations stay before being cleared automatically.
    pub auto_clear_after: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            auto_clear_after: DEFAULT_AUTO_CLEAR_AFTER,
        }
    }
}

/// The entry a validation result was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationContext {
    /// The carer the candidate belonged to.
    pub carer_id: CarerId,
    /// Display name of the carer.
    pub carer_name: String,
    /// The candidate's date.
    pub date: Date,
    /// The candidate's shift type.
    pub shift_type: ShiftType,
}

/// Identity of a recent violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViolationKey {
    /// `rule-carer-date-shift-message prefix`.
    pub composite: String,
    /// Monotonic tiebreaker across calls.
    pub sequence: u64,
}

impl ViolationKey {
    fn composite_for(violation: &RuleViolation, context: &ViolationContext) -> String {
        let message: String = violation.message.chars().take(MESSAGE_KEY_CHARS).collect();
        format!(
            "{}-{}-{}-{}-{message}",
            violation.rule, context.carer_id, context.date, context.shift_type
        )
    }
}

/// Where a displayed violation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationOrigin {
    /// From a recent validation result; expires.
    Transient {
        /// Identity used for dismissal and expiry.
        key: ViolationKey,
        /// When the auto-clear removes it.
        expires_at: Instant,
    },
    /// From the saved schedule; cannot be dismissed.
    Persistent {
        /// The stored entry the violation belongs to.
        source_entry_id: Option<EntryId>,
    },
}

/// One row of the violation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedViolation {
    /// The violation itself.
    pub violation: RuleViolation,
    /// Display name of the affected carer.
    pub carer_name: String,
    /// Recent or persistent.
    pub origin: ViolationOrigin,
}

impl DisplayedViolation {
    /// Returns whether this row can be dismissed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.origin, ViolationOrigin::Transient { .. })
    }
}

/// Lifecycle state of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No recent violations.
    Idle,
    /// Recent violations are held.
    Active,
}

#[derive(Debug, Clone)]
struct AutoClear {
    deadline: Instant,
    keys: HashSet<ViolationKey>,
}

/// Holds recent and persistent violations for one view.
#[derive(Debug)]
pub struct ViolationTracker<C: Clock = SystemClock> {
    clock: C,
    config: TrackerConfig,
    recent: Vec<DisplayedViolation>,
    persistent: Vec<DisplayedViolation>,
    show_all: bool,
    auto_clear: Option<AutoClear>,
    next_sequence: u64,
    disposed: bool,
}

impl ViolationTracker<SystemClock> {
    /// Creates a tracker on the system clock with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock, TrackerConfig::default())
    }
}

impl Default for ViolationTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ViolationTracker<C> {
    /// Creates a tracker on the given clock.
    #[must_use]
    pub const fn with_clock(clock: C, config: TrackerConfig) -> Self {
        Self {
            clock,
            config,
            recent: Vec::new(),
            persistent: Vec::new(),
            show_all: false,
            auto_clear: None,
            next_sequence: 0,
            disposed: false,
        }
    }

    /// Receives a validation result for one candidate.
    ///
    /// A non-empty result replaces the recent set and arms an auto-clear
    /// for exactly the violations it introduced. An empty result clears
    /// the recent set.
    pub fn add_violations(
        &mut self,
        violations: &[RuleViolation],
        warnings: &[RuleViolation],
        context: &ViolationContext,
    ) {
        if self.disposed {
            return;
        }

        if violations.is_empty() && warnings.is_empty() {
            self.clear_recent_violations();
            return;
        }

        let expires_at: Instant = self.clock.now() + self.config.auto_clear_after;
        let mut seen: HashSet<String> = HashSet::new();
        let mut recent: Vec<DisplayedViolation> = Vec::new();
        let mut keys: HashSet<ViolationKey> = HashSet::new();

        for violation in violations.iter().chain(warnings) {
            let composite: String = ViolationKey::composite_for(violation, context);
            if !seen.insert(composite.clone()) {
                continue;
            }

            let key: ViolationKey = ViolationKey {
                composite,
                sequence: self.next_sequence,
            };
            self.next_sequence += 1;

            keys.insert(key.clone());
            recent.push(DisplayedViolation {
                violation: violation.clone(),
                carer_name: context.carer_name.clone(),
                origin: ViolationOrigin::Transient { key, expires_at },
            });
        }

        self.recent = recent;
        self.auto_clear = Some(AutoClear {
            deadline: expires_at,
            keys,
        });
    }

    /// Empties the recent set and cancels the pending auto-clear.
    pub fn clear_recent_violations(&mut self) {
        self.recent.clear();
        self.auto_clear = None;
    }

    /// Loads persistent violations from the displayed week.
    ///
    /// `names` maps carers to display names; unknown carers are shown by id.
    pub fn set_schedule_violations(
        &mut self,
        summaries: &[WeeklyScheduleSummary],
        names: &HashMap<CarerId, String>,
    ) {
        if self.disposed {
            return;
        }

        self.persistent = summaries
            .iter()
            .flat_map(|summary| summary.violations.iter())
            .map(|entry_violation| DisplayedViolation {
                violation: entry_violation.violation.clone(),
                carer_name: names
                    .get(&entry_violation.carer_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Carer {}", entry_violation.carer_id)),
                origin: ViolationOrigin::Persistent {
                    source_entry_id: entry_violation.entry_id,
                },
            })
            .collect();
    }

    /// Toggles whether persistent violations are displayed.
    pub const fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Returns whether persistent violations are displayed.
    #[must_use]
    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    /// Recent violations whose deadline has not passed.
    fn live_recent(&self) -> impl Iterator<Item = &DisplayedViolation> + '_ {
        let now: Instant = self.clock.now();
        self.recent.iter().filter(move |v| match &v.origin {
            ViolationOrigin::Transient { expires_at, .. } => *expires_at > now,
            ViolationOrigin::Persistent { .. } => true,
        })
    }

    /// Rows to display: recent first, then persistent when showing all.
    #[must_use]
    pub fn displayed_violations(&self) -> Vec<DisplayedViolation> {
        let mut displayed: Vec<DisplayedViolation> = self.live_recent().cloned().collect();
        if self.show_all {
            displayed.extend(self.persistent.iter().cloned());
        }
        displayed
    }

    /// Recent plus persistent violations, regardless of the view.
    #[must_use]
    pub fn total_violation_count(&self) -> usize {
        self.live_recent().count() + self.persistent.len()
    }

    /// Number of recent violations.
    #[must_use]
    pub fn recent_count(&self) -> usize {
        self.live_recent().count()
    }

    /// Dismisses the displayed row at `index`.
    ///
    /// Persistent rows and out-of-range indexes are ignored. Returns whether
    /// a row was removed.
    pub fn dismiss(&mut self, index: usize) -> bool {
        self.poll_expiry();

        let Some(row) = self.displayed_violations().into_iter().nth(index) else {
            return false;
        };

        let ViolationOrigin::Transient { key, .. } = row.origin else {
            return false;
        };

        let before: usize = self.recent.len();
        self.recent.retain(|v| match &v.origin {
            ViolationOrigin::Transient { key: k, .. } => *k != key,
            ViolationOrigin::Persistent { .. } => true,
        });

        if self.recent.is_empty() {
            self.auto_clear = None;
        }

        self.recent.len() < before
    }

    /// Fires the auto-clear if its deadline has passed.
    ///
    /// Returns the number of violations removed.
    pub fn poll_expiry(&mut self) -> usize {
        let now: Instant = self.clock.now();
        let due: bool = self
            .auto_clear
            .as_ref()
            .is_some_and(|pending| pending.deadline <= now);
        if !due {
            return 0;
        }

        let Some(pending) = self.auto_clear.take() else {
            return 0;
        };

        let before: usize = self.recent.len();
        self.recent.retain(|v| match &v.origin {
            ViolationOrigin::Transient { key, .. } => !pending.keys.contains(key),
            ViolationOrigin::Persistent { .. } => true,
        });
        before - self.recent.len()
    }

    /// When the pending auto-clear is due, if one is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.auto_clear.as_ref().map(|pending| pending.deadline)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TrackerState {
        if self.live_recent().next().is_none() {
            TrackerState::Idle
        } else {
            TrackerState::Active
        }
    }

    /// Tears the tracker down. Later input is ignored.
    pub fn dispose(&mut self) {
        self.clear_recent_violations();
        self.persistent.clear();
        self.show_all = false;
        self.disposed = true;
    }

    /// Returns whether [`Self::dispose`] has been called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }
}
