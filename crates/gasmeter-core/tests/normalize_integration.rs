//! Integration tests for reading normalization and daily observations.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use gasmeter_core::timeseries::daily_usage;
use gasmeter_core::{daily_observations, normalize, Reading, TariffConfig, TemperatureStore};
use proptest::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_linear_growth_over_a_month() {
    let readings = vec![
        Reading::new(base(), 100.0).unwrap(),
        Reading::new(base() + Duration::days(30), 130.0).unwrap(),
    ];
    let points = normalize(&readings);

    assert_eq!(points.len(), 31);
    assert_eq!(points[0].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(points[30].day, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    for usage in daily_usage(&points) {
        assert!((usage - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_observations_pick_up_temperatures() {
    let readings = vec![
        Reading::new(base(), 0.0).unwrap(),
        Reading::new(base() + Duration::days(4), 8.0).unwrap(),
    ];
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let mut store = TemperatureStore::new(today);
    store.insert(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 2.0);

    let obs = daily_observations(&normalize(&readings), &TariffConfig::default(), &store);
    assert_eq!(obs.len(), 4);
    assert_eq!(obs.iter().filter(|o| o.temperature.is_some()).count(), 1);
    assert_eq!(obs[1].temperature, Some(2.0));
}

proptest! {
    #[test]
    fn prop_one_point_per_day_inclusive(
        offsets in prop::collection::vec(0i64..(60 * 24 * 60), 2..12),
        values in prop::collection::vec(0.0f64..10_000.0, 12),
    ) {
        let readings: Vec<Reading> = offsets
            .iter()
            .zip(values.iter())
            .map(|(&mins, &v)| Reading::new(base() + Duration::minutes(mins), v).unwrap())
            .collect();
        prop_assume!(readings.iter().any(|r| r.timestamp != readings[0].timestamp));

        let first = readings.iter().min_by_key(|r| r.timestamp).unwrap();
        let last = readings.iter().max_by_key(|r| r.timestamp).unwrap();
        let points = normalize(&readings);

        let expected = (last.timestamp.date_naive() - first.timestamp.date_naive()).num_days() + 1;
        prop_assert_eq!(points.len() as i64, expected);
        prop_assert_eq!(points[0].day, first.timestamp.date_naive());
        prop_assert_eq!(points[0].value, first.value);
        for w in points.windows(2) {
            prop_assert_eq!((w[1].day - w[0].day).num_days(), 1);
        }
    }

    #[test]
    fn prop_monotone_readings_give_non_negative_usage(
        steps in prop::collection::vec((1i64..(5 * 24 * 60), 0.0f64..20.0), 2..10),
    ) {
        let mut at = base();
        let mut value = 0.0;
        let readings: Vec<Reading> = steps
            .iter()
            .map(|&(mins, inc)| {
                at += Duration::minutes(mins);
                value += inc;
                Reading::new(at, value).unwrap()
            })
            .collect();

        for usage in daily_usage(&normalize(&readings)) {
            prop_assert!(usage >= -1e-9);
        }
    }
}
