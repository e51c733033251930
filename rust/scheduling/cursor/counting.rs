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


//! Counting helpers expressed as consumers of a [`CursorStream`].

use crate::error::{Error, Result};
use crate::scheduling::cursor::{CursorStream, Position};

impl CursorStream {
    /// Pull positions until the next accepted one, returning it with the number of positions
    /// pulled. Errors if more than the search limit are rejected in a row.
    fn next_accepted(&mut self) -> Result<Option<(usize, Position)>> {
        let limit = self.search_limit;
        let mut pulled: usize = 0;
        for position in self.by_ref() {
            let position = position?;
            pulled += 1;
            if position.accepted {
                return Ok(Some((pulled, position)));
            }
            if pulled > limit {
                tracing::warn!(
                    limit,
                    last = %position.value,
                    "no accepted date within search limit"
                );
                return Err(Error::SearchExhausted { limit });
            }
        }
        Ok(None)
    }

    /// The `n`th accepted position (1-based) pulled from here on, or `None` if the stream
    /// ends first.
    pub fn nth_accepted(&mut self, n: usize) -> Result<Option<Position>> {
        Ok(self.steps_and_nth_accepted(n)?.map(|(_, p)| p))
    }

    /// The number of steps between the first pulled position and the `n`th accepted one.
    ///
    /// For a fresh stream this counts from `start`, so an accepted `start` gives
    /// `steps_to_nth_accepted(1) == Some(0)`.
    pub fn steps_to_nth_accepted(&mut self, n: usize) -> Result<Option<usize>> {
        Ok(self.steps_and_nth_accepted(n)?.map(|(steps, _)| steps))
    }

    /// The number of steps until the first accepted position.
    pub fn steps_to_first_accepted(&mut self) -> Result<Option<usize>> {
        self.steps_to_nth_accepted(1)
    }

    /// The number of consecutive accepted positions pulled from here on.
    ///
    /// Stops at the first rejected position (which is consumed) or when the stream ends.
    ///
    /// The search limit also caps the run itself: more than `search_limit` accepted positions
    /// in a row is reported as [`Error::SearchExhausted`], so an unbounded stream that accepts
    /// everything cannot loop forever.
    pub fn leading_accepted(&mut self) -> Result<usize> {
        let limit = self.search_limit;
        let mut count: usize = 0;
        for position in self.by_ref() {
            if !position?.accepted {
                return Ok(count);
            }
            count += 1;
            if count > limit {
                return Err(Error::SearchExhausted { limit });
            }
        }
        Ok(count)
    }

    /// The number of accepted positions remaining in a bounded stream.
    ///
    /// The stream must be bounded by an `end` or `terminate` predicate.
    pub fn count_accepted(&mut self) -> Result<usize> {
        let mut count: usize = 0;
        while self.next_accepted()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    fn steps_and_nth_accepted(&mut self, n: usize) -> Result<Option<(usize, Position)>> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "`n` counts accepted positions from 1".to_string(),
            ));
        }
        let mut pulled_total: usize = 0;
        let mut last = None;
        for _ in 0..n {
            match self.next_accepted()? {
                None => return Ok(None),
                Some((pulled, position)) => {
                    pulled_total += pulled;
                    last = Some(position);
                }
            }
        }
        Ok(last.map(|p| (pulled_total - 1, p)))
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, Cursor, Predicate, Signal};
    use chrono::prelude::*;
    use chrono::TimeDelta;

    fn fixture_weekdays(start: NaiveDateTime) -> Cursor {
        Cursor::try_new(start, TimeDelta::days(1))
            .unwrap()
            .with_accept(|d: &NaiveDateTime| d.weekday().num_days_from_monday() < 5)
    }

    #[test]
    fn test_steps_to_first_accepted() {
        // Saturday 4th January 2020
        let mut itr = fixture_weekdays(ndt(2020, 1, 4)).open();
        assert_eq!(itr.steps_to_first_accepted().unwrap(), Some(2));
        let mut itr = fixture_weekdays(ndt(2020, 1, 6)).open();
        assert_eq!(itr.steps_to_first_accepted().unwrap(), Some(0));
    }

    #[test]
    fn test_nth_accepted() {
        let mut itr = fixture_weekdays(ndt(2020, 1, 3)).open();
        let p = itr.nth_accepted(3).unwrap().unwrap();
        assert_eq!(p.value, ndt(2020, 1, 7));
        // continues from where it stopped
        let p = itr.nth_accepted(1).unwrap().unwrap();
        assert_eq!(p.value, ndt(2020, 1, 8));
        assert!(itr.nth_accepted(0).is_err());
    }

    #[test]
    fn test_steps_to_nth_accepted() {
        let mut itr = fixture_weekdays(ndt(2020, 1, 3)).open();
        assert_eq!(itr.steps_to_nth_accepted(2).unwrap(), Some(3));
    }

    #[test]
    fn test_leading_accepted() {
        // Monday 6th January 2020
        let mut itr = fixture_weekdays(ndt(2020, 1, 6)).open();
        assert_eq!(itr.leading_accepted().unwrap(), 5);
        let mut itr = fixture_weekdays(ndt(2020, 1, 4)).open();
        assert_eq!(itr.leading_accepted().unwrap(), 0);
    }

    #[test]
    fn test_count_accepted() {
        let cursor = fixture_weekdays(ndt(2020, 1, 1)).with_end(ndt(2020, 1, 31));
        assert_eq!(cursor.open().count_accepted().unwrap(), 23);
    }

    #[test]
    fn test_exhausted_stream() {
        let cursor = fixture_weekdays(ndt(2020, 1, 4)).with_end(ndt(2020, 1, 5));
        assert_eq!(cursor.open().steps_to_first_accepted().unwrap(), None);
    }

    #[test]
    fn test_search_limit() {
        let cursor = Cursor::try_new(ndt(2020, 1, 1), TimeDelta::days(1))
            .unwrap()
            .with_accept(Predicate::never())
            .with_search_limit(50);
        let result = cursor.open().steps_to_first_accepted();
        assert_eq!(result, Err(Error::SearchExhausted { limit: 50 }));

        let cursor = Cursor::try_new(ndt(2020, 1, 1), TimeDelta::days(1))
            .unwrap()
            .with_search_limit(50);
        let result = cursor.open().leading_accepted();
        assert_eq!(result, Err(Error::SearchExhausted { limit: 50 }));
    }

    #[test]
    fn test_leading_accepted_run_is_capped() {
        let run = |days: i64| {
            crate::scheduling::between(ndt(2020, 1, 1), ndt(2020, 1, 1) + TimeDelta::days(days - 1), TimeDelta::days(1))
                .unwrap()
                .with_search_limit(5)
                .open()
                .leading_accepted()
        };
        assert_eq!(run(5), Ok(5));
        assert_eq!(run(6), Err(Error::SearchExhausted { limit: 5 }));
    }

    #[test]
    fn test_counting_after_relocation() {
        let mut itr = fixture_weekdays(ndt(2020, 1, 1)).open();
        let _ = itr.next();
        let _ = itr.resume(Signal::Relocate(ndt(2020, 1, 11))).unwrap();
        let p = itr.nth_accepted(1).unwrap().unwrap();
        assert_eq!(p.value, ndt(2020, 1, 13));
    }
}
