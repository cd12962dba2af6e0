//! End-to-end analysis from a data file on disk.

use chrono::{Days, Duration, NaiveDate, TimeZone, Utc};
use gasmeter_core::{analyze, AnomalySettings, Config, DataFile, Reading};

fn day(i: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(i)
}

/// Three weeks of daily readings where usage falls by 0.5 m³ per °C.
fn heating_season() -> DataFile {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut data = DataFile::default();
    let mut value = 500.0;
    data.add_reading(Reading::new(start, value).unwrap());

    for i in 1..=20u64 {
        let temperature = (i % 7) as f64 * 2.0;
        value += 10.0 - 0.5 * temperature;
        data.add_reading(Reading::new(start + Duration::days(i as i64), value).unwrap());
        data.set_temperature(day(i), temperature);
    }
    for i in 21..=23 {
        data.set_temperature(day(i), 4.0);
    }
    data
}

#[test]
fn test_full_pipeline_from_saved_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    heating_season().save(&path).unwrap();

    let data = DataFile::load(&path).unwrap();
    let snapshot = data.snapshot(Config::default().tariff, day(20));
    let report = analyze(&snapshot, &AnomalySettings::default());

    assert_eq!(report.intervals.len(), 20);
    assert_eq!(report.normalized.len(), 21);
    assert_eq!(report.observations.len(), 20);
    assert_eq!(report.anomalies.len(), 20);
    assert_eq!(report.anomalous_days(), 0);
    assert_eq!(report.cumulative.len(), 20);
    assert_eq!(report.efficiency.len(), 20);

    let model = report.regression.expect("temperatures cover every day");
    assert!((model.slope + 0.5).abs() < 1e-9);
    assert!((model.intercept - 10.0).abs() < 1e-9);

    assert!(report.forecast.is_available());
    assert_eq!(report.forecast.days.len(), 3);
    let total = report.forecast.total_predicted_usage.unwrap();
    assert!((total - 24.0).abs() < 1e-6);

    let summary = report.summary.unwrap();
    let last = report.cumulative.last().unwrap().total;
    assert!((summary.cost - last).abs() < 1e-6);

    let (naive, smart) = report.projection.latest().unwrap();
    assert!((naive - smart).abs() < 1e-9);
}

#[test]
fn test_selected_range_narrows_every_analytic() {
    let data = heating_season();
    let snapshot = data.snapshot(Config::default().tariff, day(20));
    let from = snapshot.readings[15].id;
    let to = snapshot.readings[5].id;

    let window = snapshot.window(from, to).unwrap();
    let report = analyze(&window, &AnomalySettings::default());

    assert_eq!(window.readings.len(), 11);
    assert_eq!(report.observations.len(), 10);
    assert_eq!(report.observations.first().unwrap().day, day(6));
    let summary = report.summary.unwrap();
    assert!((summary.days - 10.0).abs() < 1e-9);
}

#[test]
fn test_too_little_data_degrades_gracefully() {
    let mut data = DataFile::default();
    data.add_reading(
        Reading::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(), 10.0).unwrap(),
    );
    let report = analyze(
        &data.snapshot(Config::default().tariff, day(0)),
        &AnomalySettings::default(),
    );

    assert!(report.intervals.is_empty());
    assert!(report.summary.is_none());
    assert!(report.observations.is_empty());
    assert!(report.regression.is_none());
    assert!(report.projection.latest().is_none());
    assert!(!report.forecast.is_available());
}
