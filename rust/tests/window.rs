use crate::scheduling::{Membership, WindowCache};
use chrono::{Datelike, NaiveDate, TimeDelta};
use proptest::prelude::*;
use std::cell::Cell;

fn query_dates() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..3_000, 1..40)
}

proptest! {
    #[test]
    fn prop_checked_range_only_widens(offsets in query_dates()) {
        let base = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let cache = WindowCache::new();
        let mut previous: Option<(NaiveDate, NaiveDate)> = None;
        for offset in offsets {
            let date = base + TimeDelta::days(offset);
            let fetches = Cell::new(0);
            let classified = cache.checked_range(Membership::Exclusion, "prop")
                .is_some_and(|(lo, hi)| lo <= date && date <= hi);
            let held = cache
                .contains(Membership::Exclusion, "prop", date, |lo, hi| {
                    fetches.set(fetches.get() + 1);
                    Ok(lo.iter_days().take_while(|d| *d <= hi).filter(|d| d.day0() == 0).collect())
                })
                .unwrap();
            prop_assert_eq!(held, date.day0() == 0);
            if classified {
                prop_assert_eq!(fetches.get(), 0);
            }
            let range = cache.checked_range(Membership::Exclusion, "prop").unwrap();
            if let Some((lo, hi)) = previous {
                prop_assert!(range.0 <= lo && hi <= range.1);
            }
            prop_assert!(range.0 <= date && date <= range.1);
            previous = Some(range);
        }
    }
}
