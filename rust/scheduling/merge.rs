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


//! Lock-step k-way merging of [`Cursor`]s into a single ordered stream.

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::scheduling::{Cursor, CursorStream, Direction, Position};

/// How the flags of cursors sitting on the same date are combined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combine {
    /// Accepted if any cursor on the date accepted it.
    Union,
    /// Accepted only if every cursor sits on the date and accepted it.
    Intersection,
}

/// An ordered stream of every date visited by any of its input cursors.
///
/// Each distinct date is emitted exactly once, tagged by the [`Combine`] rule. Dates that are
/// not accepted are still emitted, so consumers filter on [`Position::accepted`].
///
/// The order of inputs is kept sorted by their lookahead, with exhausted inputs last. After
/// an emission only the inputs that sat on the emitted date are advanced and reinserted, so
/// the ordering is never rebuilt from scratch.
///
/// # Examples
/// ```rust
/// # use dateseq::scheduling::{ndt, union, WeekdayCal, DateRoll};
/// # use chrono::{TimeDelta, Weekday};
/// let mon = WeekdayCal::single(Weekday::Mon).cursor(ndt(2020, 1, 3), TimeDelta::days(1)).unwrap();
/// let tue = WeekdayCal::single(Weekday::Tue).cursor(ndt(2020, 1, 3), TimeDelta::days(1)).unwrap();
/// let dates: Vec<_> = union(vec![mon, tue]).unwrap()
///     .filter_map(|p| p.ok().filter(|p| p.accepted).map(|p| p.value))
///     .take(4)
///     .collect();
/// assert_eq!(dates, vec![ndt(2020, 1, 6), ndt(2020, 1, 7), ndt(2020, 1, 13), ndt(2020, 1, 14)]);
/// ```
#[derive(Debug)]
pub struct Merge {
    streams: Vec<CursorStream>,
    heads: Vec<Option<Position>>,
    order: Vec<usize>,
    combine: Combine,
    direction: Direction,
    primed: bool,
    done: bool,
}

impl Merge {
    /// Merge at least two cursors which share a direction.
    pub fn try_new(cursors: Vec<Cursor>, combine: Combine) -> Result<Self> {
        if cursors.len() < 2 {
            return Err(Error::TooFewInputs(cursors.len()));
        }
        let direction = cursors[0].direction();
        if let Some(index) = cursors.iter().position(|c| c.direction() != direction) {
            return Err(Error::DirectionMismatch { index });
        }
        let n = cursors.len();
        Ok(Merge {
            streams: cursors.iter().map(Cursor::open).collect(),
            heads: vec![None; n],
            order: Vec::with_capacity(n),
            combine,
            direction,
            primed: false,
            done: false,
        })
    }

    /// The combine rule.
    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// The shared direction of the inputs.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Only the accepted dates.
    pub fn accepted_values(self) -> impl Iterator<Item = Result<NaiveDateTime>> {
        self.filter_map(|p| match p {
            Ok(p) if p.accepted => Some(Ok(p.value)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
    }

    fn prime(&mut self) -> Result<()> {
        for i in 0..self.streams.len() {
            self.heads[i] = self.streams[i].next().transpose()?;
        }
        let (heads, direction) = (&self.heads, self.direction);
        self.order = (0..heads.len())
            .sorted_by(|&a, &b| rank(direction, &heads[a], &heads[b]))
            .collect();
        self.primed = true;
        Ok(())
    }

    fn finished(&self) -> bool {
        match self.combine {
            Combine::Union => self.heads.iter().all(Option::is_none),
            Combine::Intersection => self.heads.iter().any(Option::is_none),
        }
    }

    // Move input `i` to the rank implied by its current head.
    fn reinsert(&mut self, i: usize) {
        let (heads, direction) = (&self.heads, self.direction);
        let at = self
            .order
            .partition_point(|&j| rank(direction, &heads[j], &heads[i]) != Ordering::Greater);
        self.order.insert(at, i);
    }

    fn advance(&mut self) -> Result<Option<Position>> {
        if !self.primed {
            self.prime()?;
        }
        if self.finished() {
            return Ok(None);
        }
        let value = match self.heads[self.order[0]] {
            Some(p) => p.value,
            None => return Ok(None),
        };
        let size = self
            .order
            .iter()
            .take_while(|&&i| matches!(self.heads[i], Some(p) if p.value == value))
            .count();
        let group: Vec<usize> = self.order.drain(..size).collect();

        let accepted = match self.combine {
            Combine::Union => group.iter().any(|&i| self.head_accepted(i)),
            Combine::Intersection => {
                group.len() == self.streams.len() && group.iter().all(|&i| self.head_accepted(i))
            }
        };
        if group.len() > 1 {
            tracing::trace!(%value, size = group.len(), accepted, "flushing tie group");
        }

        for &i in group.iter() {
            self.heads[i] = self.streams[i].next().transpose()?;
        }
        if let &[i] = group.as_slice() {
            // a lone leader that still leads keeps its place
            let leads = match self.order.first() {
                None => true,
                Some(&j) => rank(self.direction, &self.heads[i], &self.heads[j]) == Ordering::Less,
            };
            if leads {
                self.order.insert(0, i);
                return Ok(Some(Position { accepted, value }));
            }
        }
        for i in group {
            self.reinsert(i);
        }
        Ok(Some(Position { accepted, value }))
    }

    fn head_accepted(&self, i: usize) -> bool {
        self.heads[i].is_some_and(|p| p.accepted)
    }
}

// Exhausted inputs rank last; live inputs rank by value in the direction of travel.
fn rank(direction: Direction, a: &Option<Position>, b: &Option<Position>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            Direction::Forward => x.value.cmp(&y.value),
            Direction::Backward => y.value.cmp(&x.value),
        },
    }
}

impl Iterator for Merge {
    type Item = Result<Position>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.advance();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result.transpose()
    }
}

/// Merge cursors, accepting dates accepted by any of them.
pub fn union(cursors: Vec<Cursor>) -> Result<Merge> {
    Merge::try_new(cursors, Combine::Union)
}

/// Merge cursors, accepting dates accepted by all of them.
pub fn intersection(cursors: Vec<Cursor>) -> Result<Merge> {
    Merge::try_new(cursors, Combine::Intersection)
}
