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
use std::cmp::Ordering;

use crate::error::{checked_add, Error, Result};
use crate::scheduling::{between, Adjuster, Adjustment, Cursor, CursorStream, Predicate, Signal};

/// Date validity and rolling, driven through [`Cursor`]s.
///
/// Implementors define which dates are valid; every rolling operation is then expressed as a
/// cursor that accepts valid dates, steered with control signals where a single search has
/// to change direction.
pub trait DateRoll {
    /// Returns whether the date is valid, e.g. a business day.
    fn is_valid(&self, date: &NaiveDateTime) -> Result<bool>;

    /// The validity test as a [`Predicate`] that can be attached to a cursor.
    fn predicate(&self) -> Predicate;

    /// Returns whether the date is not valid.
    fn is_invalid(&self, date: &NaiveDateTime) -> Result<bool> {
        Ok(!self.is_valid(date)?)
    }

    /// A cursor from `start` by `step` which accepts valid dates.
    fn cursor(&self, start: NaiveDateTime, step: TimeDelta) -> Result<Cursor> {
        Ok(Cursor::try_new(start, step)?.with_accept(self.predicate()))
    }

    /// A cursor from `start` by `step` which accepts dates that are valid and pass `accept`.
    fn cursor_with(&self, start: NaiveDateTime, step: TimeDelta, accept: &Predicate) -> Result<Cursor> {
        Ok(Cursor::try_new(start, step)?.with_accept(self.predicate().and(accept)))
    }

    /// Return the `date`, if valid, or get the next valid date after `date`.
    fn roll_forward(&self, date: &NaiveDateTime) -> Result<NaiveDateTime> {
        first_accepted(&mut self.cursor(*date, TimeDelta::days(1))?.open())
    }

    /// Return the `date`, if valid, or get the valid date preceding `date`.
    fn roll_backward(&self, date: &NaiveDateTime) -> Result<NaiveDateTime> {
        first_accepted(&mut self.cursor(*date, TimeDelta::days(-1))?.open())
    }

    /// Return the `date`, if valid, or get the next valid date, without rolling into a new
    /// month.
    fn roll_mod_forward(&self, date: &NaiveDateTime) -> Result<NaiveDateTime> {
        let mut stream = self.cursor(*date, TimeDelta::days(1))?.open();
        let new_date = first_accepted(&mut stream)?;
        if new_date.month() != date.month() {
            seek(&mut stream, *date, TimeDelta::days(-1))
        } else {
            Ok(new_date)
        }
    }

    /// Return the `date`, if valid, or get the preceding valid date, without rolling into a
    /// new month.
    fn roll_mod_backward(&self, date: &NaiveDateTime) -> Result<NaiveDateTime> {
        let mut stream = self.cursor(*date, TimeDelta::days(-1))?.open();
        let new_date = first_accepted(&mut stream)?;
        if new_date.month() != date.month() {
            seek(&mut stream, *date, TimeDelta::days(1))
        } else {
            Ok(new_date)
        }
    }

    /// Add a given number of valid days to a valid `date`.
    fn add_valid_days(&self, date: &NaiveDateTime, days: i32) -> Result<NaiveDateTime> {
        if self.is_invalid(date)? {
            return Err(Error::InvalidArgument(
                "Cannot add valid days to an input `date` that is not valid.".to_string(),
            ));
        }
        if days == 0 {
            return Ok(*date);
        }
        let mut stream = self.cursor(*date, TimeDelta::days(days.signum().into()))?.open();
        let _ = stream.resume(Signal::Resume)?;
        match stream.nth_accepted(days.unsigned_abs() as usize)? {
            Some(p) => Ok(p.value),
            None => Err(ended_early()),
        }
    }

    /// Adjust a date by a number of valid days, under lag rules.
    ///
    /// *Note*: if the number of days is **zero** an invalid date will be rolled **forwards**.
    ///
    /// *Note*: if the given `date` is invalid adding or subtracting 1 valid day is equivalent
    /// to rolling forwards or backwards, respectively.
    fn lag_valid_days(&self, date: &NaiveDateTime, days: i32) -> Result<NaiveDateTime> {
        if self.is_valid(date)? {
            return self.add_valid_days(date, days);
        }
        match days.cmp(&0_i32) {
            Ordering::Equal => self.roll_forward(date),
            Ordering::Less => self.add_valid_days(&self.roll_backward(date)?, days + 1),
            Ordering::Greater => self.add_valid_days(&self.roll_forward(date)?, days - 1),
        }
    }

    /// Add a given number of calendar days to a `date` with the result adjusted.
    fn add_cal_days(&self, date: &NaiveDateTime, days: i32, adjuster: &Adjuster) -> Result<NaiveDateTime>
    where
        Self: Sized,
    {
        let new_date = checked_add(*date, TimeDelta::days(days.into()))?;
        adjuster.adjust(&new_date, self)
    }

    /// Return a vector of valid dates between a start and end, inclusive.
    ///
    /// If `end` precedes `start` the dates are returned in descending order.
    fn valid_date_range(&self, start: &NaiveDateTime, end: &NaiveDateTime) -> Result<Vec<NaiveDateTime>> {
        let step = if end < start { TimeDelta::days(-1) } else { TimeDelta::days(1) };
        let cursor = between(*start, *end, step)?.with_accept(self.predicate());
        cursor
            .open()
            .filter_map(|p| match p {
                Ok(p) if !p.accepted => None,
                other => Some(other.map(|p| p.value)),
            })
            .collect()
    }

    /// Return a vector of calendar dates between a start and end, inclusive.
    fn cal_date_range(&self, start: &NaiveDateTime, end: &NaiveDateTime) -> Result<Vec<NaiveDateTime>> {
        let step = if end < start { TimeDelta::days(-1) } else { TimeDelta::days(1) };
        between(*start, *end, step)?
            .open()
            .map(|p| p.map(|p| p.value))
            .collect()
    }
}

fn ended_early() -> Error {
    Error::Protocol("stream ended before an accepted date was found".to_string())
}

// Pull the next accepted date from the stream.
fn first_accepted(stream: &mut CursorStream) -> Result<NaiveDateTime> {
    match stream.nth_accepted(1)? {
        Some(p) => Ok(p.value),
        None => Err(ended_early()),
    }
}

// Turn the stream around to travel by `step` and search again from `from`, inclusive.
fn seek(stream: &mut CursorStream, from: NaiveDateTime, step: TimeDelta) -> Result<NaiveDateTime> {
    stream.resume(Signal::RebindStep(step))?;
    stream.resume(Signal::Relocate(from))?;
    first_accepted(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{ndt, Calendar, CalendarAdjustment, Membership, ProviderCal, StaticProvider, WeekdayCal, WindowCache};
    use std::sync::Arc;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Saturday and Monday holidays on top of a Saturday/Sunday weekend.
    fn fixture_hol_cal() -> Calendar {
        let provider = StaticProvider::new().with_dates("fixture", vec![d(2015, 9, 5), d(2015, 9, 7)]);
        let hols = ProviderCal::new("fixture", Membership::Exclusion, Arc::new(provider))
            .with_cache(Arc::new(WindowCache::new()));
        Calendar::All(vec![WeekdayCal::business().into(), hols.into()])
    }

    #[test]
    fn test_roll_forward() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.roll_forward(&ndt(2015, 9, 7)).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.roll_forward(&ndt(2015, 9, 5)).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.roll_forward(&ndt(2015, 9, 4)).unwrap(), ndt(2015, 9, 4));
    }

    #[test]
    fn test_roll_backward() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.roll_backward(&ndt(2015, 9, 7)).unwrap(), ndt(2015, 9, 4));
        assert_eq!(cal.roll_backward(&ndt(2015, 9, 4)).unwrap(), ndt(2015, 9, 4));
    }

    #[test]
    fn test_is_valid() {
        let cal = fixture_hol_cal();
        assert!(!cal.is_valid(&ndt(2015, 9, 7)).unwrap()); // Monday in Hol list
        assert!(cal.is_valid(&ndt(2015, 9, 10)).unwrap()); // Thursday
        assert!(cal.is_invalid(&ndt(2024, 1, 6)).unwrap()); // Saturday
    }

    #[test]
    fn test_roll_mod() {
        let cal = WeekdayCal::business();
        // Saturday 29th April 2017 rolls back into April
        assert_eq!(cal.roll_mod_forward(&ndt(2017, 4, 29)).unwrap(), ndt(2017, 4, 28));
        assert_eq!(cal.roll_mod_forward(&ndt(2017, 4, 22)).unwrap(), ndt(2017, 4, 24));
        // Sunday 1st October 2017 rolls forward into October
        assert_eq!(cal.roll_mod_backward(&ndt(2017, 10, 1)).unwrap(), ndt(2017, 10, 2));
        assert_eq!(cal.roll_mod_backward(&ndt(2017, 10, 8)).unwrap(), ndt(2017, 10, 6));
    }

    #[test]
    fn test_add_valid_days() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.add_valid_days(&ndt(2015, 9, 4), 1).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.add_valid_days(&ndt(2015, 9, 8), -1).unwrap(), ndt(2015, 9, 4));
        assert_eq!(cal.add_valid_days(&ndt(2015, 9, 8), 3).unwrap(), ndt(2015, 9, 11));
        assert_eq!(cal.add_valid_days(&ndt(2015, 9, 8), 0).unwrap(), ndt(2015, 9, 8));
        assert!(cal.add_valid_days(&ndt(2015, 9, 7), 3).is_err());
    }

    #[test]
    fn test_lag_valid_days() {
        let cal = fixture_hol_cal();
        assert_eq!(cal.lag_valid_days(&ndt(2015, 9, 7), 1).unwrap(), ndt(2015, 9, 8));
        assert_eq!(cal.lag_valid_days(&ndt(2015, 9, 7), 2).unwrap(), ndt(2015, 9, 9));
        assert_eq!(cal.lag_valid_days(&ndt(2015, 9, 7), -1).unwrap(), ndt(2015, 9, 4));
        assert_eq!(cal.lag_valid_days(&ndt(2015, 9, 7), 0).unwrap(), ndt(2015, 9, 8));
    }

    #[test]
    fn test_add_cal_days() {
        let cal = fixture_hol_cal();
        let next = cal.add_cal_days(&ndt(2015, 9, 3), 2, &Adjuster::Following {}).unwrap();
        assert_eq!(next, ndt(2015, 9, 8));
        let prev = cal.add_cal_days(&ndt(2015, 9, 9), -2, &Adjuster::Previous {}).unwrap();
        assert_eq!(prev, ndt(2015, 9, 4));
    }

    #[test]
    fn test_date_ranges() {
        let cal = fixture_hol_cal();
        let result = cal.valid_date_range(&ndt(2015, 9, 3), &ndt(2015, 9, 9)).unwrap();
        assert_eq!(result, vec![ndt(2015, 9, 3), ndt(2015, 9, 4), ndt(2015, 9, 8), ndt(2015, 9, 9)]);
        let result = cal.valid_date_range(&ndt(2015, 9, 9), &ndt(2015, 9, 4)).unwrap();
        assert_eq!(result, vec![ndt(2015, 9, 9), ndt(2015, 9, 8), ndt(2015, 9, 4)]);
        let result = cal.cal_date_range(&ndt(2015, 9, 3), &ndt(2015, 9, 5)).unwrap();
        assert_eq!(result, vec![ndt(2015, 9, 3), ndt(2015, 9, 4), ndt(2015, 9, 5)]);
    }

    #[test]
    fn test_cursor_with_extra_filter() {
        let cal = WeekdayCal::business();
        let not_fridays = Predicate::new(|d| d.weekday() != Weekday::Fri);
        let mut stream = cal.cursor_with(ndt(2020, 1, 3), TimeDelta::days(1), &not_fridays).unwrap().open();
        assert_eq!(stream.nth_accepted(1).unwrap().unwrap().value, ndt(2020, 1, 6));
    }

    #[test]
    fn test_adjusts_with_calendar() {
        let cal = fixture_hol_cal();
        let result = cal
            .adjusts(&vec![ndt(2015, 9, 4), ndt(2015, 9, 5), ndt(2015, 9, 7)], &Adjuster::Following {})
            .unwrap();
        assert_eq!(result, vec![ndt(2015, 9, 4), ndt(2015, 9, 8), ndt(2015, 9, 8)]);
    }
}
