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
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The boundary to an external holiday or market calendar data source.
///
/// Implementations must be referentially transparent for a fixed `key` and range: the
/// [`WindowCache`](crate::scheduling::WindowCache) relies on a fetched range never changing.
pub trait HolidayProvider: Send + Sync {
    /// Return the member dates of `key` within `[start, end]` inclusive.
    ///
    /// Depending on how the provider is used these are holidays or valid days. Unknown keys
    /// and unsupported ranges should be reported as [`Error::Provider`].
    fn fetch(&self, key: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>>;
}

impl<F> HolidayProvider for F
where
    F: Fn(&str, NaiveDate, NaiveDate) -> Result<Vec<NaiveDate>> + Send + Sync,
{
    fn fetch(&self, key: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
        self(key, start, end)
    }
}

/// An in-memory provider with a fixed list of dates per key.
///
/// An optional coverage range rejects requests that reach outside the data held, the way
/// a real data source rejects dates it has no data for.
///
/// # Examples
/// ```rust
/// # use dateseq::scheduling::{HolidayProvider, StaticProvider};
/// # use chrono::NaiveDate;
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let provider = StaticProvider::new().with_dates("ldn", vec![d(2017, 5, 1), d(2017, 5, 29)]);
/// assert_eq!(provider.fetch("ldn", d(2017, 5, 1), d(2017, 5, 15)).unwrap(), vec![d(2017, 5, 1)]);
/// assert!(provider.fetch("nyc", d(2017, 5, 1), d(2017, 5, 15)).is_err());
/// ```
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticProvider {
    pub(crate) dates: IndexMap<String, IndexSet<NaiveDate>>,
    pub(crate) coverage: Option<(NaiveDate, NaiveDate)>,
}

impl StaticProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dates` under `key`, merging with any already held.
    pub fn with_dates(mut self, key: &str, dates: Vec<NaiveDate>) -> Self {
        self.insert(key, dates);
        self
    }

    /// Restrict the range of dates this provider will answer for.
    pub fn with_coverage(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.coverage = Some((start, end));
        self
    }

    /// Add `dates` under `key`, merging with any already held.
    pub fn insert(&mut self, key: &str, dates: Vec<NaiveDate>) {
        self.dates
            .entry(key.to_lowercase())
            .or_default()
            .extend(dates);
    }

    /// Return a list of keys.
    pub fn keys(&self) -> Vec<String> {
        self.dates.keys().cloned().collect()
    }
}

impl HolidayProvider for StaticProvider {
    fn fetch(&self, key: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
        let k = key.to_lowercase();
        let dates = self.dates.get(&k).ok_or_else(|| Error::Provider {
            key: k.clone(),
            message: "calendar is not found in list of existing calendars".to_string(),
        })?;
        if let Some((lo, hi)) = self.coverage {
            if start < lo || end > hi {
                return Err(Error::Provider {
                    key: k,
                    message: format!("range {start} to {end} is outside of coverage {lo} to {hi}"),
                });
            }
        }
        let mut found: Vec<NaiveDate> = dates
            .iter()
            .filter(|d| **d >= start && **d <= end)
            .copied()
            .collect();
        found.sort();
        Ok(found)
    }
}
