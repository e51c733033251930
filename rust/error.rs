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


//! Error types for date sequence generation.
//!
//! Construction and protocol errors fail fast at the call that introduces the invalid
//! state. Provider failures are carried through unchanged so that the caller of a
//! calendar lookup sees exactly what the data source reported.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;

/// The error type used throughout `dateseq`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A cursor was given (or rebound to) a step of zero length.
    #[error("`step` must be non-zero")]
    ZeroStep,

    /// The merge engine needs at least two inputs.
    #[error("a merge requires at least 2 cursors, got {0}")]
    TooFewInputs(usize),

    /// Inputs to the merge engine do not share a direction.
    #[error("cursor {index} steps in the opposite direction to cursor 0")]
    DirectionMismatch {
        /// Position of the offending cursor in the input list.
        index: usize,
    },

    /// A control signal was sent that the stream cannot act on in its current state.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No accepted position was found within the iteration safety bound.
    #[error("no accepted date found within {limit} steps")]
    SearchExhausted {
        /// The bound that was exceeded.
        limit: usize,
    },

    /// The external holiday provider failed.
    #[error("provider error for '{key}': {message}")]
    Provider {
        /// Calendar key that was being fetched.
        key: String,
        /// Message reported by the provider.
        message: String,
    },

    /// Date arithmetic overflowed the representable range.
    #[error("date out of range: {date} + {step}")]
    DateOutOfRange {
        /// The date being stepped from.
        date: NaiveDateTime,
        /// The offending offset.
        step: TimeDelta,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout `dateseq`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Add `step` to `date`, converting overflow into [`Error::DateOutOfRange`].
pub(crate) fn checked_add(date: NaiveDateTime, step: TimeDelta) -> Result<NaiveDateTime> {
    date.checked_add_signed(step)
        .ok_or(Error::DateOutOfRange { date, step })
}

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::InvalidArgument(format!($($msg)*)));
        }
    };
}
pub(crate) use ensure;
