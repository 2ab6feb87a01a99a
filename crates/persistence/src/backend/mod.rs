// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Limited to connection initialization, migration execution, `PRAGMA`
//! configuration and helpers that have no Diesel DSL equivalent. All rota
//! queries and mutations live in `queries/` and `mutations/`.

pub mod sqlite;
