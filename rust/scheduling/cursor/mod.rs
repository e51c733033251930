// SPDX-License-Identifier: LicenseRef-Rateslib-Dual
//
// Copyright (c) 2026 Siffrorna Technology Limited
// This code cannot be used or copied externally
//
// Dual-licensed: Free Educational Licence or Paid Commercial Licence (commercial/professional use)
// Source-available, not open source.
//
// See LICENSE and https://rateslib.com/py/en/latest/i_licence.html for details,
// and/or contact info (at) rateslib (dot) com
////////////////////////////////////////////////////////////////////////////////////////////////////


mod counting;
#[allow(clippy::module_inception)]
mod cursor;
mod predicate;
mod signal;

pub use crate::scheduling::cursor::{
    cursor::{between, Cursor, CursorStream, Direction, Position, DEFAULT_SEARCH_LIMIT},
    predicate::Predicate,
    signal::Signal,
};
