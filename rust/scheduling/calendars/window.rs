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
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;

// A single memory allocated space for windows shared by every calendar that does not bring
// its own cache.
static GLOBAL_WINDOWS: LazyLock<Arc<WindowCache>> = LazyLock::new(|| Arc::new(WindowCache::new()));

/// Whether the dates held for a calendar key are the valid days or the excluded days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Membership {
    /// Held dates are valid days; anything else is rejected.
    Inclusion,
    /// Held dates are holidays; anything else is accepted.
    Exclusion,
}

/// A read-only copy of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub membership: Membership,
    pub key: String,
    /// First date of the checked range.
    pub lo: NaiveDate,
    /// Last date of the checked range.
    pub hi: NaiveDate,
    /// Held dates within the checked range, sorted.
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
struct Window {
    range: Option<(NaiveDate, NaiveDate)>,
    dates: HashSet<NaiveDate>,
}

impl Window {
    fn covers(&self, date: &NaiveDate) -> bool {
        self.range.is_some_and(|(lo, hi)| lo <= *date && *date <= hi)
    }

    // The range that must be fetched to extend the window up to `date`, with no margin.
    fn gap_to(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.range {
            Some((lo, _)) if date < lo => (date, lo.pred_opt().unwrap_or(date)),
            Some((_, hi)) if date > hi => (hi.succ_opt().unwrap_or(date), date),
            _ => (date, date),
        }
    }

    // A fetched range can only be merged if the result is still one contiguous interval.
    fn can_merge(&self, gap: &(NaiveDate, NaiveDate)) -> bool {
        match self.range {
            None => true,
            Some((lo, hi)) => (gap.0 - hi).num_days() <= 1 && (lo - gap.1).num_days() <= 1,
        }
    }

    fn merge(&mut self, gap: (NaiveDate, NaiveDate), dates: impl IntoIterator<Item = NaiveDate>) {
        self.dates
            .extend(dates.into_iter().filter(|d| gap.0 <= *d && *d <= gap.1));
        self.range = Some(match self.range {
            None => gap,
            Some((lo, hi)) => (lo.min(gap.0), hi.max(gap.1)),
        });
    }
}

/// An incrementally extending cache of calendar membership.
///
/// Each `(membership, key)` entry holds a closed checked range `[lo, hi]` and the member
/// dates inside it. Queries inside the range are answered from the cache; a query outside
/// calls `fetch` for exactly the missing stretch between the range and the date, merges the
/// result and widens the range. Entries only grow and are never evicted.
///
/// The cache lock is never held while `fetch` runs. Results are merged after re-reading the
/// current range, and a fetch that no longer joins the range contiguously (because another
/// thread created the entry meanwhile) answers its own query without being committed.
///
/// # Examples
/// ```rust
/// # use dateseq::scheduling::{Membership, WindowCache};
/// # use chrono::NaiveDate;
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let cache = WindowCache::new();
/// let is_hol = cache
///     .contains(Membership::Exclusion, "ldn", d(2017, 5, 1), |_lo, _hi| Ok(vec![d(2017, 5, 1)]))
///     .unwrap();
/// assert!(is_hol);
/// assert_eq!(cache.checked_range(Membership::Exclusion, "ldn"), Some((d(2017, 5, 1), d(2017, 5, 1))));
/// ```
#[derive(Debug, Default)]
pub struct WindowCache {
    windows: RwLock<HashMap<Membership, HashMap<String, Window>>>,
}

impl WindowCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> Arc<WindowCache> {
        Arc::clone(&GLOBAL_WINDOWS)
    }

    /// Returns whether `date` is a held date for `key`, extending the checked range with
    /// `fetch(lo, hi)` if `date` lies outside it.
    ///
    /// Errors from `fetch` are returned unchanged and leave the entry untouched.
    pub fn contains<F>(
        &self,
        membership: Membership,
        key: &str,
        date: NaiveDate,
        fetch: F,
    ) -> Result<bool>
    where
        F: FnOnce(NaiveDate, NaiveDate) -> Result<Vec<NaiveDate>>,
    {
        let gap = {
            let r = self.read();
            match r.get(&membership).and_then(|m| m.get(key)) {
                Some(window) if window.covers(&date) => return Ok(window.dates.contains(&date)),
                Some(window) => window.gap_to(date),
                None => (date, date),
            }
        };

        tracing::debug!(?membership, key, lo = %gap.0, hi = %gap.1, "extending checked window");
        let fetched = fetch(gap.0, gap.1)?;

        let mut w = self.write();
        let window = w
            .entry(membership)
            .or_default()
            .entry(key.to_string())
            .or_default();
        if window.covers(&date) {
            return Ok(window.dates.contains(&date));
        }
        if window.can_merge(&gap) {
            window.merge(gap, fetched);
            Ok(window.dates.contains(&date))
        } else {
            tracing::debug!(?membership, key, "discarding non-contiguous window extension");
            Ok(fetched.contains(&date))
        }
    }

    /// The checked range for `key`, if any query has been made.
    pub fn checked_range(&self, membership: Membership, key: &str) -> Option<(NaiveDate, NaiveDate)> {
        let r = self.read();
        r.get(&membership)
            .and_then(|m| m.get(key))
            .and_then(|w| w.range)
    }

    /// A copy of the entry for `key`, if any query has been made.
    pub fn snapshot(&self, membership: Membership, key: &str) -> Option<WindowSnapshot> {
        let r = self.read();
        let window = r.get(&membership)?.get(key)?;
        let (lo, hi) = window.range?;
        let mut dates: Vec<NaiveDate> = window.dates.iter().copied().collect();
        dates.sort();
        Some(WindowSnapshot {
            membership,
            key: key.to_string(),
            lo,
            hi,
            dates,
        })
    }

    /// Return a list of keys with an entry under `membership`.
    pub fn keys(&self, membership: Membership) -> Vec<String> {
        let r = self.read();
        let mut keys: Vec<String> = r
            .get(&membership)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Membership, HashMap<String, Window>>> {
        self.windows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Membership, HashMap<String, Window>>> {
        self.windows.write().unwrap_or_else(PoisonError::into_inner)
    }
}
