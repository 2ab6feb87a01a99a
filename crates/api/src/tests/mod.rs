// Copyright (C) 2026 CareTrack contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod coverage_tests;
mod error_tests;
mod helpers;
mod read_tests;
