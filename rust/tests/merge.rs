use crate::scheduling::{between, intersection, ndt, union, Cursor, Direction, Position, Predicate};
use chrono::{Datelike, NaiveDateTime, TimeDelta};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// Inputs start within a week of one end of Jan-Feb 2020 and run to the other end.
fn input() -> impl Strategy<Value = (i64, i64, u32)> {
    (0i64..7, 1i64..6, 0u32..7)
}

fn build(direction: Direction, (offset, step, modulus): (i64, i64, u32)) -> Cursor {
    let accept = Predicate::new(move |d: &NaiveDateTime| modulus == 0 || d.ordinal() % (modulus + 1) == 0);
    let (first, last) = (ndt(2020, 1, 1), ndt(2020, 2, 29));
    let cursor = match direction {
        Direction::Forward => between(first + TimeDelta::days(offset), last, TimeDelta::days(step)),
        Direction::Backward => between(last - TimeDelta::days(offset), first, TimeDelta::days(-step)),
    };
    cursor.unwrap().with_accept(accept)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

// Every date visited by each input with the flag it was given.
fn visits(cursor: &Cursor) -> Vec<Position> {
    cursor.open().map(|p| p.unwrap()).collect()
}

fn in_order<T>(direction: Direction, values: impl DoubleEndedIterator<Item = T>) -> Vec<T> {
    match direction {
        Direction::Forward => values.collect(),
        Direction::Backward => values.rev().collect(),
    }
}

proptest! {
    #[test]
    fn prop_union_emits_every_visit_once(
        direction in direction(),
        specs in prop::collection::vec(input(), 2..5),
    ) {
        let cursors: Vec<_> = specs.into_iter().map(|s| build(direction, s)).collect();
        let mut expected: BTreeMap<NaiveDateTime, bool> = BTreeMap::new();
        for cursor in cursors.iter() {
            for p in visits(cursor) {
                *expected.entry(p.value).or_insert(false) |= p.accepted;
            }
        }
        let result: Vec<(NaiveDateTime, bool)> = union(cursors)
            .unwrap()
            .map(|p| p.map(|p| (p.value, p.accepted)).unwrap())
            .collect();
        prop_assert_eq!(result, in_order(direction, expected.into_iter()));
    }

    #[test]
    fn prop_intersection_accepts_exactly_common_accepted(
        direction in direction(),
        specs in prop::collection::vec(input(), 2..4),
    ) {
        let cursors: Vec<_> = specs.into_iter().map(|s| build(direction, s)).collect();
        // a date every input visits lies before the first input runs out
        let common: BTreeSet<NaiveDateTime> = cursors
            .iter()
            .map(|c| {
                visits(c)
                    .into_iter()
                    .filter(|p| p.accepted)
                    .map(|p| p.value)
                    .collect::<BTreeSet<_>>()
            })
            .reduce(|a, b| a.intersection(&b).copied().collect())
            .unwrap_or_default();
        let accepted: Vec<NaiveDateTime> = intersection(cursors)
            .unwrap()
            .accepted_values()
            .map(|v| v.unwrap())
            .collect();
        prop_assert_eq!(accepted, in_order(direction, common.into_iter()));
    }
}
