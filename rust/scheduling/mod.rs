//! Generate steerable date sequences, classify dates against calendars and merge sequences.
//!
//! The purpose of this module is to provide objects capable of expressing date rules as lazy
//! streams of candidate dates, including examples such as;
//! - Walking dates forwards or backwards by a fixed step, flagging those that pass a predicate.
//! - Steering a walk mid-stream, e.g. jumping to a new date or reversing the direction.
//! - Classifying dates against holiday data that is fetched lazily and cached by date window.
//! - Combining several walks into one ordered stream under *union* or *intersection* rules.
//!
//! # Cursors
//!
//! A [`Cursor`] is an immutable description of a walk: a start date, a non-zero step and an
//! accept [`Predicate`], with an optional terminate predicate and an inclusive end date.
//! Opening a cursor produces a [`CursorStream`], a resumable state machine that is driven by
//! control [`Signal`]s.
//!
//! A plain [`Signal::Resume`] moves the stream by one step and evaluates the predicate. Every
//! other signal moves the stream without evaluating it, and the position it returns carries
//! over the previous `accepted` flag. Such positions are **provisional**.
//!
//! ### Example
//! This example walks forward from Friday 3rd January 2020 accepting Mondays, then jumps
//! back to the start.
//! ```rust
//! # use dateseq::scheduling::{ndt, Cursor, Signal};
//! # use chrono::{Datelike, TimeDelta, Weekday};
//! let cursor = Cursor::try_new(ndt(2020, 1, 3), TimeDelta::days(1))
//!     .unwrap()
//!     .with_accept(|d: &chrono::NaiveDateTime| d.weekday() == Weekday::Mon);
//! let mut stream = cursor.open();
//! let monday = stream.nth_accepted(1).unwrap().unwrap();
//! assert_eq!(monday.value, ndt(2020, 1, 6));
//!
//! // provisional: the flag is carried over from Monday
//! let p = stream.resume(Signal::Relocate(ndt(2020, 1, 3))).unwrap().unwrap();
//! assert_eq!((p.accepted, p.value), (true, ndt(2020, 1, 2)));
//! ```
//!
//! # Calendars and Date Adjustment
//!
//! ## Calendars
//!
//! Two leaf calendar types are provided: [`WeekdayCal`], valid on a fixed set of weekdays,
//! and [`ProviderCal`], whose dates come from a [`HolidayProvider`] and are memoised in a
//! [`WindowCache`]. The container enum [`Calendar`] holds either of these or an `All`/`Any`
//! combination of other calendars.
//!
//! All calendars implement the [`DateRoll`] trait which provides **rolling**: moving forward or
//! backward from an invalid date to a valid one. Every roll is performed by a cursor that
//! accepts valid dates.
//!
//! ### Example
//! This example creates a business day calendar with Saturday and Sunday weekends and a
//! specific holiday (the Early May UK Bank Holiday). It rolls Saturday 29th April 2017 under
//! the *'following'* and *'modified following'* rules.
//! ```rust
//! # use dateseq::scheduling::{ndt, Calendar, DateRoll, Membership, ProviderCal, StaticProvider, WeekdayCal};
//! # use chrono::NaiveDate;
//! # use std::sync::Arc;
//! let provider = StaticProvider::new()
//!     .with_dates("ldn", vec![NaiveDate::from_ymd_opt(2017, 5, 1).unwrap()]);
//! let hols = ProviderCal::new("ldn", Membership::Exclusion, Arc::new(provider));
//! let cal = Calendar::All(vec![WeekdayCal::business().into(), hols.into()]);
//! assert_eq!(ndt(2017, 5, 2), cal.roll_forward(&ndt(2017, 4, 29)).unwrap());
//! assert_eq!(ndt(2017, 4, 28), cal.roll_mod_forward(&ndt(2017, 4, 29)).unwrap());
//! ```
//!
//! ## Date Adjustment
//!
//! The [`Adjuster`] is an enum which defines date adjustment rules. It implements the
//! [`Adjustment`] trait requiring some object capable of performing [`DateRoll`] to define
//! the operations. All calendar types implement the [`CalendarAdjustment`] trait which permits
//! date adjustment when an [`Adjuster`] is cross-provided.
//!
//! ### Example
//! ```rust
//! # use dateseq::scheduling::{ndt, Adjuster, CalendarAdjustment, WeekdayCal};
//! let cal = WeekdayCal::business();
//! let adjuster = Adjuster::CalDaysLag { number: 5 };
//! assert_eq!(ndt(2017, 5, 2), cal.adjust(&ndt(2017, 4, 27), &adjuster).unwrap());
//! ```
//!
//! # Merging
//!
//! A [`Merge`] combines two or more cursors of the same direction into one ordered stream
//! that visits every date visited by any input exactly once. Under [`Combine::Union`] a date
//! is accepted if any input accepted it, and under [`Combine::Intersection`] only if all
//! inputs sit on it and accept it.
//!
//! ### Example
//! ```rust
//! # use dateseq::scheduling::{ndt, intersection, between, DateRoll, WeekdayCal};
//! # use chrono::{TimeDelta, Weekday};
//! let a = between(ndt(2020, 1, 3), ndt(2020, 1, 17), TimeDelta::days(1)).unwrap()
//!     .with_accept(WeekdayCal::from_weekdays([Weekday::Mon, Weekday::Tue]).predicate());
//! let b = between(ndt(2020, 1, 3), ndt(2020, 1, 17), TimeDelta::days(1)).unwrap()
//!     .with_accept(WeekdayCal::from_weekdays([Weekday::Tue, Weekday::Wed]).predicate());
//! let tuesdays: Vec<_> = intersection(vec![a, b]).unwrap()
//!     .accepted_values()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tuesdays, vec![ndt(2020, 1, 7), ndt(2020, 1, 14)]);
//! ```

mod calendars;
mod cursor;
mod merge;

mod serde;

pub use crate::scheduling::{
    calendars::{
        ndt, Adjuster, Adjustment, Calendar, CalendarAdjustment, DateRoll, HolidayProvider,
        Membership, ProviderCal, StaticProvider, WeekdayCal, WindowCache, WindowSnapshot,
    },
    cursor::{between, Cursor, CursorStream, Direction, Position, Predicate, Signal, DEFAULT_SEARCH_LIMIT},
    merge::{intersection, union, Combine, Merge},
};
