//! Per-day observations derived from adjacent normalized points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{days_between, NormalizedPoint};
use crate::tariff::TariffConfig;
use crate::weather::TemperatureStore;

/// Usage, cost and temperature for one day of the normalized grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub day: NaiveDate,
    /// m³ consumed since the previous grid point
    pub usage: f64,
    /// Days since the previous grid point (1 on a contiguous grid)
    pub elapsed_days: f64,
    pub cost: f64,
    /// `cost` scaled to a single day
    pub daily_cost: f64,
    /// Mean temperature in °C, when a sample exists for `day`
    pub temperature: Option<f64>,
}

impl DailyObservation {
    /// Usage per day.
    pub fn rate(&self) -> f64 {
        if self.elapsed_days > 0.0 {
            self.usage / self.elapsed_days
        } else {
            self.usage
        }
    }
}

/// One observation per grid point after the first.
pub fn daily_observations(
    points: &[NormalizedPoint],
    tariff: &TariffConfig,
    temperatures: &TemperatureStore,
) -> Vec<DailyObservation> {
    let observations: Vec<DailyObservation> = points
        .windows(2)
        .map(|w| {
            let (prev, curr) = (&w[0], &w[1]);
            let usage = curr.value - prev.value;
            let elapsed_days = days_between(prev.day, curr.day);
            let cost = tariff.cost(usage, elapsed_days);
            let daily_cost = if elapsed_days > 0.0 { cost / elapsed_days } else { cost };
            DailyObservation {
                day: curr.day,
                usage,
                elapsed_days,
                cost,
                daily_cost,
                temperature: temperatures.get(curr.day),
            }
        })
        .collect();

    let negative = observations.iter().filter(|o| o.usage < 0.0).count();
    if negative > 0 {
        tracing::warn!(
            days = negative,
            "meter value decreased on some days; those days are costed at zero"
        );
    }
    observations
}

/// Running cost total at the end of each day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeCost {
    pub day: NaiveDate,
    pub total: f64,
}

pub fn cumulative_costs(observations: &[DailyObservation]) -> Vec<CumulativeCost> {
    observations
        .iter()
        .scan(0.0, |running, obs| {
            *running += obs.cost;
            Some(CumulativeCost {
                day: obs.day,
                total: *running,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn points(values: &[f64]) -> Vec<NormalizedPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| NormalizedPoint {
                day: day(i as u32 + 1),
                value,
            })
            .collect()
    }

    #[test]
    fn test_observations_follow_second_point_onward() {
        let tariff = TariffConfig::default();
        let store = TemperatureStore::new(day(31));
        let obs = daily_observations(&points(&[10.0, 12.0, 15.0]), &tariff, &store);

        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].day, day(2));
        assert_eq!(obs[0].usage, 2.0);
        assert_eq!(obs[1].usage, 3.0);
        assert_eq!(obs[1].elapsed_days, 1.0);
        assert_eq!(obs[1].cost, tariff.cost(3.0, 1.0));
        assert_eq!(obs[1].daily_cost, obs[1].cost);
        assert_eq!(obs[1].rate(), 3.0);
    }

    #[test]
    fn test_temperature_attached_when_present() {
        let tariff = TariffConfig::default();
        let mut store = TemperatureStore::new(day(31));
        store.insert(day(3), 4.5);
        let obs = daily_observations(&points(&[10.0, 12.0, 15.0]), &tariff, &store);

        assert_eq!(obs[0].temperature, None);
        assert_eq!(obs[1].temperature, Some(4.5));
    }

    #[test]
    fn test_decreasing_meter_costs_zero() {
        let tariff = TariffConfig::default();
        let store = TemperatureStore::new(day(31));
        let obs = daily_observations(&points(&[10.0, 9.0]), &tariff, &store);
        assert_eq!(obs[0].usage, -1.0);
        assert_eq!(obs[0].cost, 0.0);
    }

    #[test]
    fn test_cumulative_costs_run_forward() {
        let tariff = TariffConfig::default();
        let store = TemperatureStore::new(day(31));
        let obs = daily_observations(&points(&[0.0, 1.0, 2.0, 3.0]), &tariff, &store);
        let running = cumulative_costs(&obs);

        assert_eq!(running.len(), 3);
        assert!((running[2].total - 3.0 * tariff.cost(1.0, 1.0)).abs() < 1e-9);
        assert!(running.windows(2).all(|w| w[1].total >= w[0].total));
    }
}
