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
use std::convert::From;

use crate::error::Result;
use crate::scheduling::{CalendarAdjustment, DateRoll, Predicate, ProviderCal, WeekdayCal};

/// Create a `NaiveDateTime` with default null time.
///
/// Panics if date values are invalid.
pub fn ndt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("`year`, `month` `day` are invalid.")
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Container for calendar types.
///
/// `All` is valid where every member is valid, e.g. a business week with holidays removed.
/// `Any` is valid where at least one member is valid.
#[derive(Debug, Clone)]
pub enum Calendar {
    Weekday(WeekdayCal),
    Provider(ProviderCal),
    All(Vec<Calendar>),
    Any(Vec<Calendar>),
}

impl From<WeekdayCal> for Calendar {
    fn from(item: WeekdayCal) -> Self {
        Calendar::Weekday(item)
    }
}

impl From<ProviderCal> for Calendar {
    fn from(item: ProviderCal) -> Self {
        Calendar::Provider(item)
    }
}

impl DateRoll for Calendar {
    fn is_valid(&self, date: &NaiveDateTime) -> Result<bool> {
        match self {
            Calendar::Weekday(c) => c.is_valid(date),
            Calendar::Provider(c) => c.is_valid(date),
            Calendar::All(cals) => {
                for c in cals {
                    if !c.is_valid(date)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Calendar::Any(cals) => {
                for c in cals {
                    if c.is_valid(date)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn predicate(&self) -> Predicate {
        match self {
            Calendar::Weekday(c) => c.predicate(),
            Calendar::Provider(c) => c.predicate(),
            Calendar::All(cals) => cals
                .iter()
                .fold(Predicate::always(), |acc, c| acc.and(&c.predicate())),
            Calendar::Any(cals) => cals
                .iter()
                .fold(Predicate::never(), |acc, c| acc.or(&c.predicate())),
        }
    }
}

impl CalendarAdjustment for Calendar {}
