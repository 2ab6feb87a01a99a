// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `entries`: rota entry lookups by carer, date range and id
//! - `audit`: audit event retrieval and timelines

pub mod audit;
pub mod entries;
