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
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::scheduling::{CalendarAdjustment, DateRoll, HolidayProvider, Membership, Predicate, WindowCache};

/// A calendar whose membership data is sourced from a [`HolidayProvider`] and memoised in a
/// [`WindowCache`].
///
/// Under [`Membership::Exclusion`] the provider supplies holidays and a date is valid when it
/// is *not* held. Under [`Membership::Inclusion`] the provider supplies valid days and a date
/// is valid when it *is* held.
#[derive(Clone)]
pub struct ProviderCal {
    pub name: String,
    membership: Membership,
    provider: Arc<dyn HolidayProvider>,
    cache: Arc<WindowCache>,
}

impl ProviderCal {
    /// Create a provider calendar backed by the process-wide [`WindowCache::global`].
    ///
    /// Cache entries are keyed by membership and lower-cased name only. Two calendars with the
    /// same name and membership but different providers read and extend the same entry, and
    /// whichever provider fetched a range first decides it. Use [`ProviderCal::with_cache`] to
    /// isolate such a calendar.
    pub fn new(name: &str, membership: Membership, provider: Arc<dyn HolidayProvider>) -> Self {
        ProviderCal {
            name: name.to_lowercase(),
            membership,
            provider,
            cache: WindowCache::global(),
        }
    }

    /// Use an explicitly owned cache instead of the process-wide one.
    pub fn with_cache(mut self, cache: Arc<WindowCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    pub fn cache(&self) -> &Arc<WindowCache> {
        &self.cache
    }

    /// Returns whether the provider holds `date` for this calendar, fetching if required.
    pub fn is_held(&self, date: &NaiveDateTime) -> Result<bool> {
        let provider = &self.provider;
        let name = &self.name;
        self.cache
            .contains(self.membership, name, date.date(), |lo, hi| {
                tracing::debug!(key = %name, %lo, %hi, "fetching from provider");
                provider.fetch(name, lo, hi)
            })
    }
}

impl DateRoll for ProviderCal {
    fn is_valid(&self, date: &NaiveDateTime) -> Result<bool> {
        let held = self.is_held(date)?;
        Ok(match self.membership {
            Membership::Exclusion => !held,
            Membership::Inclusion => held,
        })
    }

    fn predicate(&self) -> Predicate {
        let cal = self.clone();
        Predicate::try_new(move |date| cal.is_valid(date))
    }
}

impl CalendarAdjustment for ProviderCal {}

impl fmt::Debug for ProviderCal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCal")
            .field("name", &self.name)
            .field("membership", &self.membership)
            .finish_non_exhaustive()
    }
}
