//! Integration tests for anomaly classification feeding the cost projection.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use gasmeter_core::{
    daily_observations, normalize, project, AnomalyDetector, DailyObservation, Reading,
    TariffConfig, TemperatureStore,
};
use proptest::prelude::*;

fn month_of_steady_use() -> Vec<Reading> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    vec![
        Reading::new(start, 100.0).unwrap(),
        Reading::new(start + Duration::days(30), 130.0).unwrap(),
    ]
}

#[test]
fn test_steady_month_projects_its_own_bill() {
    let tariff = TariffConfig::default();
    let points = normalize(&month_of_steady_use());
    assert_eq!(points.len(), 31);

    let projection = project(&points, &tariff, &[]);
    let (naive, smart) = projection.latest().unwrap();
    let bill = tariff.cost(30.0, 30.0);

    assert!((naive - bill).abs() < 1e-6, "naive {naive} vs {bill}");
    assert!((smart - bill).abs() < 1e-6);
}

#[test]
fn test_daily_readings_of_steady_use_have_no_anomalies() {
    let tariff = TariffConfig::default();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let daily: Vec<Reading> = (0..=30)
        .map(|d| Reading::new(start + Duration::days(d), 100.0 + d as f64).unwrap())
        .collect();
    let store = TemperatureStore::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    let obs = daily_observations(&normalize(&daily), &tariff, &store);

    let flags = AnomalyDetector::new().flags(&obs);
    assert_eq!(flags.len(), 30);
    assert!(flags.iter().all(|f| !f));
}

#[test]
fn test_spike_is_excluded_from_smart_projection() {
    let tariff = TariffConfig::default();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut value = 0.0;
    let mut readings = vec![Reading::new(start, value).unwrap()];
    for day in 1..=20 {
        value += if day == 12 { 40.0 } else { 2.0 };
        readings.push(Reading::new(start + Duration::days(day), value).unwrap());
    }

    let points = normalize(&readings);
    let store = TemperatureStore::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    let obs = daily_observations(&points, &tariff, &store);
    let flags = AnomalyDetector::new().flags(&obs);
    assert_eq!(flags.iter().filter(|f| **f).count(), 1);
    assert!(flags[11]);

    let (naive, smart) = project(&points, &tariff, &flags).latest().unwrap();
    let normal = tariff.cost(2.0, 1.0) * 30.0;
    assert!((smart - normal).abs() < 1e-6);
    assert!(naive > smart);
}

#[test]
fn test_everything_flagged_falls_back_to_naive() {
    let tariff = TariffConfig::default();
    let points = normalize(&month_of_steady_use());
    let flags = vec![true; points.len() - 1];

    let projection = project(&points, &tariff, &flags);
    assert_eq!(projection.smart, projection.naive);
}

fn observations(usages: &[f64], temps: &[Option<f64>]) -> Vec<DailyObservation> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    usages
        .iter()
        .zip(temps.iter())
        .enumerate()
        .map(|(i, (&usage, &temperature))| DailyObservation {
            day: start + chrono::Days::new(i as u64),
            usage,
            elapsed_days: 1.0,
            cost: usage,
            daily_cost: usage,
            temperature,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_classification_is_deterministic(
        usages in prop::collection::vec(0.0f64..50.0, 0..40),
        temps in prop::collection::vec(prop::option::of(-10.0f64..25.0), 40),
    ) {
        let obs = observations(&usages, &temps);
        let detector = AnomalyDetector::new();
        let first = detector.flags(&obs);
        prop_assert_eq!(first.len(), obs.len());
        prop_assert_eq!(first, detector.flags(&obs));
    }

    #[test]
    fn prop_smart_equals_naive_without_flags(
        increments in prop::collection::vec(0.0f64..30.0, 1..30),
    ) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut value = 0.0;
        let mut readings = vec![Reading::new(start, value).unwrap()];
        for (i, inc) in increments.iter().enumerate() {
            value += inc;
            readings.push(Reading::new(start + Duration::days(i as i64 + 1), value).unwrap());
        }

        let projection = project(&normalize(&readings), &TariffConfig::default(), &[]);
        for (n, s) in projection.naive.iter().zip(projection.smart.iter()) {
            prop_assert!((n.projected_monthly_cost - s.projected_monthly_cost).abs() < 1e-9);
        }
    }
}
