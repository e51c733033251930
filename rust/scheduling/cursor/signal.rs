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


use chrono::prelude::*;
use chrono::TimeDelta;

use crate::scheduling::cursor::Predicate;

/// A control value sent into a suspended [`CursorStream`](crate::scheduling::CursorStream).
///
/// Every variant other than [`Signal::Resume`] produces a *provisional* position: the
/// `accepted` flag returned alongside it is carried over from the previous emission and
/// only the following plain resume evaluates the predicate afresh.
#[derive(Debug, Clone)]
pub enum Signal {
    /// Advance by one step and evaluate the accept predicate.
    Resume,
    /// Move back by one step.
    RepeatBack,
    /// Move by `step * k`. A negative `k` moves against the configured direction.
    ///
    /// `Skip(0)` is treated as [`Signal::RepeatBack`].
    Skip(i64),
    /// Move to one step before the given instant, so the next resume lands on it.
    Relocate(NaiveDateTime),
    /// Replace the step for all subsequent resumes.
    RebindStep(TimeDelta),
    /// Replace the accept predicate for all subsequent evaluations.
    RebindAccept(Predicate),
}

impl Signal {
    /// Returns whether the signal is a plain resume.
    pub fn is_resume(&self) -> bool {
        matches!(self, Signal::Resume)
    }
}

impl From<i64> for Signal {
    fn from(k: i64) -> Self {
        if k == 0 {
            Signal::RepeatBack
        } else {
            Signal::Skip(k)
        }
    }
}

impl From<NaiveDateTime> for Signal {
    fn from(date: NaiveDateTime) -> Self {
        Signal::Relocate(date)
    }
}

impl From<NaiveDate> for Signal {
    fn from(date: NaiveDate) -> Self {
        Signal::Relocate(date.and_time(NaiveTime::MIN))
    }
}

impl From<TimeDelta> for Signal {
    fn from(step: TimeDelta) -> Self {
        Signal::RebindStep(step)
    }
}

impl From<Predicate> for Signal {
    fn from(accept: Predicate) -> Self {
        Signal::RebindAccept(accept)
    }
}

impl From<Option<Signal>> for Signal {
    fn from(signal: Option<Signal>) -> Self {
        signal.unwrap_or(Signal::Resume)
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::ndt;

    #[test]
    fn test_integer_signals() {
        assert!(matches!(Signal::from(0_i64), Signal::RepeatBack));
        assert!(matches!(Signal::from(3_i64), Signal::Skip(3)));
        assert!(matches!(Signal::from(-2_i64), Signal::Skip(-2)));
    }

    #[test]
    fn test_date_signals() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        match Signal::from(date) {
            Signal::Relocate(d) => assert_eq!(d, ndt(2020, 1, 1)),
            _ => panic!("expected a relocation"),
        }
    }

    #[test]
    fn test_none_is_resume() {
        assert!(Signal::from(None::<Signal>).is_resume());
        assert!(!Signal::from(TimeDelta::days(2)).is_resume());
    }
}
