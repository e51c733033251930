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


//! Calendars which decide date validity and roll dates through cursors.

mod adjuster;
mod calendar;
mod dateroll;
mod provider;
mod provider_cal;
mod weekday_cal;
mod window;

pub use crate::scheduling::calendars::{
    adjuster::{Adjuster, Adjustment, CalendarAdjustment},
    calendar::{ndt, Calendar},
    dateroll::DateRoll,
    provider::{HolidayProvider, StaticProvider},
    provider_cal::ProviderCal,
    weekday_cal::WeekdayCal,
    window::{Membership, WindowCache, WindowSnapshot},
};
