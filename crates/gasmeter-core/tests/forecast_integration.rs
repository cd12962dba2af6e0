//! Integration tests for the temperature-driven usage forecast.

use chrono::{Days, NaiveDate};
use gasmeter_core::{forecast, forecast_temperatures, RegressionModel, TariffConfig, TemperatureStore};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn day(i: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).unwrap() + Days::new(i)
}

#[test]
fn test_caches_split_at_today() {
    let today = day(10);
    let observed: BTreeMap<NaiveDate, f64> = (0..=12).map(|i| (day(i), 1.0)).collect();
    let forecasts: BTreeMap<NaiveDate, f64> = (8..=14).map(|i| (day(i), 3.0)).collect();
    let store = TemperatureStore::from_caches(today, &observed, &forecasts);

    assert_eq!(store.get(day(9)), Some(1.0));
    assert_eq!(store.get(day(10)), Some(1.0));
    assert_eq!(store.get(day(11)), Some(3.0));

    let model = RegressionModel::fit_pairs(&[(0.0, 6.0), (1.0, 5.0), (2.0, 4.0), (3.0, 3.0), (4.0, 2.0)])
        .unwrap();
    let result = forecast(Some(&model), &store, &TariffConfig::default());
    assert_eq!(result.days.len(), 4);
    assert_eq!(result.days[0].day, day(11));
    assert!((result.total_predicted_usage.unwrap() - 12.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_forecast_is_never_negative(
        slope in -5.0f64..5.0,
        intercept in -20.0f64..20.0,
        temps in prop::collection::vec(-25.0f64..35.0, 1..30),
    ) {
        let model = RegressionModel { slope, intercept, r_squared: 0.5, sample_count: 10 };
        let upcoming: BTreeMap<NaiveDate, f64> = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| (day(i as u64), t))
            .collect();

        let result = forecast_temperatures(Some(&model), &upcoming, &TariffConfig::default());
        prop_assert!(result.days.len() <= 16);
        prop_assert!(result.days.iter().all(|d| d.predicted_usage >= 0.0));
        prop_assert!(result.total_predicted_usage.unwrap() >= 0.0);
        prop_assert!(result.projected_cost.unwrap() >= 0.0);
    }
}
