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

type PredicateFn = dyn Fn(&NaiveDateTime) -> Result<bool> + Send + Sync;

/// A shareable, possibly fallible, test applied to each date a cursor visits.
///
/// Predicates are reference counted so that cloning a [`Cursor`](crate::scheduling::Cursor)
/// or rebinding one mid-stream is cheap. Fallible predicates are needed for calendars whose
/// membership data comes from an external provider.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wrap an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        Predicate::try_new(move |date: &NaiveDateTime| -> Result<bool> { Ok(f(date)) })
    }

    /// Wrap a closure that may fail, e.g. one that consults a holiday provider.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&NaiveDateTime) -> Result<bool> + Send + Sync + 'static,
    {
        Predicate(Arc::new(f))
    }

    /// A predicate that holds for every date.
    pub fn always() -> Self {
        Predicate::new(|_| true)
    }

    /// A predicate that holds for no date.
    pub fn never() -> Self {
        Predicate::new(|_| false)
    }

    /// Evaluate the predicate.
    pub fn test(&self, date: &NaiveDateTime) -> Result<bool> {
        (self.0)(date)
    }

    /// Logical conjunction. `other` is not evaluated when `self` rejects.
    pub fn and(&self, other: &Predicate) -> Predicate {
        let (a, b) = (self.clone(), other.clone());
        Predicate::try_new(move |date| Ok(a.test(date)? && b.test(date)?))
    }

    /// Logical disjunction. `other` is not evaluated when `self` accepts.
    pub fn or(&self, other: &Predicate) -> Predicate {
        let (a, b) = (self.clone(), other.clone());
        Predicate::try_new(move |date| Ok(a.test(date)? || b.test(date)?))
    }

    /// Logical negation.
    pub fn negate(&self) -> Predicate {
        let a = self.clone();
        Predicate::try_new(move |date| Ok(!a.test(date)?))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl<F> From<F> for Predicate
where
    F: Fn(&NaiveDateTime) -> bool + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Predicate::new(f)
    }
}
