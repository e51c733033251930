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
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::scheduling::{CalendarAdjustment, DateRoll, Predicate};

/// A calendar whose valid days are a fixed set of weekdays.
///
/// The set is given in terms of the days that are *valid*, e.g. Monday to Friday for a generic
/// Western business week.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCal {
    pub(crate) weekdays: HashSet<Weekday>,
}

impl WeekdayCal {
    /// Create a calendar from weekday numbers (0=Mon,.., 6=Sun) that are valid.
    pub fn try_new(weekdays: Vec<u8>) -> Result<Self> {
        let weekdays = weekdays
            .into_iter()
            .map(|v| {
                Weekday::try_from(v)
                    .map_err(|_| Error::InvalidArgument(format!("'{v}' is not a weekday number")))
            })
            .collect::<Result<HashSet<_>>>()?;
        Ok(WeekdayCal { weekdays })
    }

    /// Create a calendar valid on the given weekdays.
    pub fn from_weekdays(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        WeekdayCal {
            weekdays: weekdays.into_iter().collect(),
        }
    }

    /// Valid on a single weekday.
    pub fn single(weekday: Weekday) -> Self {
        Self::from_weekdays([weekday])
    }

    /// Valid Monday to Friday.
    pub fn business() -> Self {
        Self::from_weekdays([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    /// Valid on Saturday and Sunday only.
    pub fn weekend() -> Self {
        Self::from_weekdays([Weekday::Sat, Weekday::Sun])
    }

    /// Valid on every day of the week.
    pub fn all() -> Self {
        Self::from_weekdays((0..7).filter_map(|v: u8| Weekday::try_from(v).ok()))
    }

    /// Create a calendar by name: `"all"`, `"bus"` or `"weekend"`.
    pub fn try_from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" => Ok(Self::all()),
            "bus" => Ok(Self::business()),
            "weekend" => Ok(Self::weekend()),
            _ => Err(Error::InvalidArgument(format!(
                "'{name}' is not found in list of existing weekday calendars."
            ))),
        }
    }

    /// Returns whether the date falls on one of the valid weekdays.
    pub fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        self.weekdays.contains(&date.weekday())
    }
}

impl DateRoll for WeekdayCal {
    fn is_valid(&self, date: &NaiveDateTime) -> Result<bool> {
        Ok(self.is_weekday(date))
    }

    fn predicate(&self) -> Predicate {
        let cal = self.clone();
        Predicate::new(move |date| cal.is_weekday(date))
    }
}

impl CalendarAdjustment for WeekdayCal {}
