use crate::json::JSON;
use crate::scheduling::{Adjuster, Combine, Membership, StaticProvider, WeekdayCal, WindowSnapshot};

impl JSON for WeekdayCal {}
impl JSON for StaticProvider {}
impl JSON for Membership {}
impl JSON for WindowSnapshot {}
impl JSON for Combine {}
impl JSON for Adjuster {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::WindowCache;
    use chrono::{NaiveDate, Weekday};

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_cal_json() {
        let cal = WeekdayCal::from_weekdays([Weekday::Mon, Weekday::Thu]);
        let js = cal.to_json().unwrap();
        let cal2 = WeekdayCal::from_json(&js).unwrap();
        assert_eq!(cal, cal2);
    }

    #[test]
    fn test_static_provider_json() {
        let provider = StaticProvider::new()
            .with_dates("ldn", vec![d(2017, 5, 1), d(2017, 5, 29)])
            .with_coverage(d(2000, 1, 1), d(2099, 12, 31));
        let js = provider.to_json().unwrap();
        let provider2 = StaticProvider::from_json(&js).unwrap();
        assert_eq!(provider, provider2);
        assert_eq!(provider2.keys(), vec!["ldn".to_string()]);
    }

    #[test]
    fn test_snapshot_json() {
        let cache = WindowCache::new();
        cache
            .contains(Membership::Exclusion, "ldn", d(2017, 5, 1), |_, _| Ok(vec![d(2017, 5, 1)]))
            .unwrap();
        let snapshot = cache.snapshot(Membership::Exclusion, "ldn").unwrap();
        let js = snapshot.to_json().unwrap();
        assert_eq!(WindowSnapshot::from_json(&js).unwrap(), snapshot);
    }

    #[test]
    fn test_adjuster_json() {
        let adjuster = Adjuster::ValidDaysLag { number: 2 };
        let js = adjuster.to_json().unwrap();
        assert_eq!(js, r#"{"ValidDaysLag":{"number":2}}"#);
        assert_eq!(Adjuster::from_json(&js).unwrap(), adjuster);
        assert_eq!(Adjuster::from_json(r#"{"Following":{}}"#).unwrap(), Adjuster::Following {});
    }

    #[test]
    fn test_unit_enums_json() {
        assert_eq!(Combine::Union.to_json().unwrap(), r#""Union""#);
        assert_eq!(Combine::from_json(r#""Intersection""#).unwrap(), Combine::Intersection);
        let js = Membership::Inclusion.to_json().unwrap();
        assert_eq!(Membership::from_json(&js).unwrap(), Membership::Inclusion);
    }
}
