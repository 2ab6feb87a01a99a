// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `entries`: rota entry inserts, confirmation updates and deletes
//! - `audit`: audit event persistence
//! - `transition`: applies a core `TransitionResult` atomically

pub mod audit;
pub mod entries;
pub mod transition;

pub use transition::PersistTransitionResult;
