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

use crate::error::{checked_add, Error, Result};
use crate::scheduling::cursor::{Predicate, Signal};

/// The iteration safety bound applied when searching for an accepted date.
pub const DEFAULT_SEARCH_LIMIT: usize = 10_000;

/// The direction in which a sequence of dates travels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Dates increase.
    Forward,
    /// Dates decrease.
    Backward,
}

impl Direction {
    /// The direction implied by the sign of a non-zero `step`.
    pub fn from_step(step: &TimeDelta) -> Self {
        if *step > TimeDelta::zero() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// `+1` for [`Direction::Forward`] and `-1` for [`Direction::Backward`].
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A single emission of a [`CursorStream`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    /// Whether the accept predicate held for `value`.
    ///
    /// For a position produced directly by a control signal this is the flag carried over
    /// from the previous emission, see [`Signal`].
    pub accepted: bool,
    /// The date.
    pub value: NaiveDateTime,
}

impl From<Position> for (bool, NaiveDateTime) {
    fn from(p: Position) -> Self {
        (p.accepted, p.value)
    }
}

/// A steerable date sequence definition.
///
/// A cursor is a reusable description: `start`, a signed `step`, an `accept` predicate
/// (default: always), a `terminate` predicate (default: never) and an optional exact `end`.
/// Calling [`Cursor::open`] yields a [`CursorStream`] which does the actual stepping.
///
/// # Examples
/// ```rust
/// # use dateseq::scheduling::{ndt, Cursor, Signal};
/// # use chrono::{Datelike, TimeDelta, Weekday};
/// let cursor = Cursor::try_new(ndt(2020, 1, 3), TimeDelta::days(1))
///     .unwrap()
///     .with_accept(|d: &chrono::NaiveDateTime| d.weekday() != Weekday::Sat && d.weekday() != Weekday::Sun);
/// let mut stream = cursor.open();
/// let values: Vec<(bool, chrono::NaiveDateTime)> = stream.by_ref().take(3).map(|p| p.unwrap().into()).collect();
/// assert_eq!(values, vec![(true, ndt(2020, 1, 3)), (false, ndt(2020, 1, 4)), (false, ndt(2020, 1, 5))]);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    start: NaiveDateTime,
    step: TimeDelta,
    accept: Predicate,
    terminate: Option<Predicate>,
    end: Option<NaiveDateTime>,
    search_limit: usize,
}

impl Cursor {
    /// Create a cursor starting at `start` and moving by `step`.
    ///
    /// Errors with [`Error::ZeroStep`] if `step` is zero.
    pub fn try_new(start: NaiveDateTime, step: TimeDelta) -> Result<Self> {
        if step.is_zero() {
            return Err(Error::ZeroStep);
        }
        Ok(Cursor {
            start,
            step,
            accept: Predicate::always(),
            terminate: None,
            end: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Set the accept predicate.
    pub fn with_accept(mut self, accept: impl Into<Predicate>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Set the terminate predicate. Any position for which it holds ends the stream.
    pub fn with_terminate(mut self, terminate: impl Into<Predicate>) -> Self {
        self.terminate = Some(terminate.into());
        self
    }

    /// Set an exact stop value. The stream ends after emitting `end`.
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the iteration safety bound used by the counting helpers.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn accept(&self) -> &Predicate {
        &self.accept
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    /// The direction given by the sign of the step.
    pub fn direction(&self) -> Direction {
        Direction::from_step(&self.step)
    }

    /// A copy of this cursor with a new `start` and/or `step`, keeping the predicates.
    ///
    /// This is how a computation continues from a captured position, since a stream is not
    /// restartable in place.
    pub fn update(&self, start: Option<NaiveDateTime>, step: Option<TimeDelta>) -> Result<Cursor> {
        let step = step.unwrap_or(self.step);
        if step.is_zero() {
            return Err(Error::ZeroStep);
        }
        Ok(Cursor {
            start: start.unwrap_or(self.start),
            step,
            ..self.clone()
        })
    }

    /// Open a fresh stream positioned before `start`.
    pub fn open(&self) -> CursorStream {
        CursorStream {
            value: self.start,
            step: self.step,
            accept: self.accept.clone(),
            terminate: self.terminate.clone(),
            end: self.end,
            search_limit: self.search_limit,
            accepted: false,
            provisional: false,
            state: State::Fresh,
        }
    }
}

/// A cursor running from `start` towards `end` (inclusive) that terminates once it passes `end`.
///
/// Errors if `step` is zero or points away from `end`.
pub fn between(start: NaiveDateTime, end: NaiveDateTime, step: TimeDelta) -> Result<Cursor> {
    let cursor = Cursor::try_new(start, step)?;
    if start != end && Direction::from_step(&step) != Direction::from_step(&(end - start)) {
        return Err(Error::InvalidArgument(format!(
            "`step` {step} moves away from `end` {end}"
        )));
    }
    let terminate = match cursor.direction() {
        Direction::Forward => Predicate::new(move |d| *d > end),
        Direction::Backward => Predicate::new(move |d| *d < end),
    };
    Ok(cursor.with_terminate(terminate))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Fresh,
    Live,
    Done,
}

/// A resumable stream of [`Position`] driven by control [`Signal`]s.
///
/// The stream is an explicit state machine. Each call to [`CursorStream::resume`] moves the
/// current value according to the signal and returns the new position, or `None` once the
/// stream is exhausted. Plain resumes evaluate the accept predicate; every other signal
/// returns a provisional position whose `accepted` flag is carried over unchanged.
#[derive(Debug, Clone)]
pub struct CursorStream {
    value: NaiveDateTime,
    step: TimeDelta,
    accept: Predicate,
    terminate: Option<Predicate>,
    end: Option<NaiveDateTime>,
    pub(crate) search_limit: usize,
    accepted: bool,
    provisional: bool,
    state: State,
}

impl CursorStream {
    /// Feed a control signal and return the resulting position.
    ///
    /// The first call on a fresh stream must be [`Signal::Resume`]; it yields `start`.
    pub fn resume(&mut self, signal: impl Into<Signal>) -> Result<Option<Position>> {
        let signal = signal.into();
        match self.state {
            State::Done => return Ok(None),
            State::Fresh => {
                if !signal.is_resume() {
                    return Err(Error::Protocol(format!(
                        "a fresh stream must be resumed before it can be steered, got {signal:?}"
                    )));
                }
                let position = self.settle(self.value, true)?;
                if self.state == State::Fresh {
                    self.state = State::Live;
                }
                return Ok(position);
            }
            State::Live => {}
        }
        if self.end == Some(self.value) {
            self.state = State::Done;
            return Ok(None);
        }
        let value = match signal {
            Signal::Resume => return self.settle(checked_add(self.value, self.step)?, true),
            Signal::RepeatBack | Signal::Skip(0) => checked_add(self.value, -self.step)?,
            Signal::Skip(k) => {
                let offset = i32::try_from(k)
                    .ok()
                    .and_then(|k| self.step.checked_mul(k))
                    .ok_or_else(|| Error::InvalidArgument(format!("cannot skip {k} steps")))?;
                checked_add(self.value, offset)?
            }
            Signal::Relocate(target) => checked_add(target, -self.step)?,
            Signal::RebindStep(step) => {
                if step.is_zero() {
                    return Err(Error::ZeroStep);
                }
                let value = checked_add(self.value, -step)?;
                let prev = std::mem::replace(&mut self.step, step);
                return self.settle(value, false).inspect_err(|_| self.step = prev);
            }
            Signal::RebindAccept(accept) => {
                let value = checked_add(self.value, -self.step)?;
                let prev = std::mem::replace(&mut self.accept, accept);
                return self.settle(value, false).inspect_err(|_| self.accept = prev);
            }
        };
        self.settle(value, false)
    }

    /// Re-read the settled position, discarding any provisional lag.
    ///
    /// Issues a plain resume, a two step skip back and a plain resume. The returned value is
    /// the current value and its `accepted` flag is freshly evaluated. On a fresh stream this
    /// is the first resume.
    ///
    /// The first resume looks one step ahead, so the stream needs at least one more position
    /// before it ends. At the last position of a bounded stream, or one step before `end`,
    /// this ends the stream and returns `None`.
    pub fn peek_true_current(&mut self) -> Result<Option<Position>> {
        if self.state == State::Fresh {
            return self.resume(Signal::Resume);
        }
        if self.resume(Signal::Resume)?.is_none() {
            return Ok(None);
        }
        if self.resume(Signal::Skip(-2))?.is_none() {
            return Ok(None);
        }
        self.resume(Signal::Resume)
    }

    /// The direction of the current step.
    pub fn direction(&self) -> Direction {
        Direction::from_step(&self.step)
    }

    /// The most recently produced value, or `start` before the first resume.
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// The acceptance flag that the next provisional position would carry.
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Whether the last position was produced by a control signal rather than a plain resume.
    pub fn is_provisional(&self) -> bool {
        self.provisional
    }

    /// Whether the stream has ended.
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    // Commit `value` as the current position unless it terminates the stream. Nothing is
    // committed if a predicate fails.
    fn settle(&mut self, value: NaiveDateTime, fresh: bool) -> Result<Option<Position>> {
        if let Some(terminate) = &self.terminate {
            if terminate.test(&value)? {
                self.state = State::Done;
                return Ok(None);
            }
        }
        if fresh {
            self.accepted = self.accept.test(&value)?;
        }
        self.value = value;
        self.provisional = !fresh;
        Ok(Some(Position {
            accepted: self.accepted,
            value,
        }))
    }
}

impl Iterator for CursorStream {
    type Item = Result<Position>;

    fn next(&mut self) -> Option<Self::Item> {
        self.resume(Signal::Resume).transpose()
    }
}
