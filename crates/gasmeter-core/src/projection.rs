//! Running 30-day cost projections.
//!
//! Each day after the first, the cost accumulated so far is scaled to a
//! 30-day month. The naive series counts every day; the smart series leaves
//! out days flagged as anomalous and falls back to the naive value while no
//! normal day has been seen yet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tariff::TariffConfig;
use crate::timeseries::{days_between, NormalizedPoint};

/// Days in a projected billing month.
pub const PROJECTION_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub day: NaiveDate,
    pub projected_monthly_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub naive: Vec<ProjectionPoint>,
    pub smart: Vec<ProjectionPoint>,
}

impl Projection {
    /// Latest naive and smart values, if any day was projected.
    pub fn latest(&self) -> Option<(f64, f64)> {
        match (self.naive.last(), self.smart.last()) {
            (Some(n), Some(s)) => Some((n.projected_monthly_cost, s.projected_monthly_cost)),
            _ => None,
        }
    }
}

/// Cost and elapsed days of each grid step, paired with the day it ends on.
fn steps(points: &[NormalizedPoint], tariff: &TariffConfig) -> Vec<(NaiveDate, f64, f64)> {
    points
        .windows(2)
        .map(|w| {
            let days = days_between(w[0].day, w[1].day);
            (w[1].day, tariff.cost(w[1].value - w[0].value, days), days)
        })
        .collect()
}

/// Project monthly cost over `points`.
///
/// `flags[i]` marks the step ending at `points[i + 1]`; missing flags count
/// as normal days.
pub fn project(points: &[NormalizedPoint], tariff: &TariffConfig, flags: &[bool]) -> Projection {
    let Some(origin) = points.first().map(|p| p.day) else {
        return Projection::default();
    };
    let steps = steps(points, tariff);

    let naive: Vec<ProjectionPoint> = steps
        .iter()
        .scan(0.0, |total, &(day, cost, _)| {
            *total += cost;
            let elapsed = days_between(origin, day);
            Some(ProjectionPoint {
                day,
                projected_monthly_cost: *total / elapsed * PROJECTION_DAYS,
            })
        })
        .collect();

    let smart: Vec<ProjectionPoint> = steps
        .iter()
        .enumerate()
        .scan((0.0, 0.0), |(cost_sum, day_sum), (i, &(day, cost, days))| {
            if !flags.get(i).copied().unwrap_or(false) {
                *cost_sum += cost;
                *day_sum += days;
            }
            let projected_monthly_cost = if *day_sum > 0.0 {
                *cost_sum / *day_sum * PROJECTION_DAYS
            } else {
                naive[i].projected_monthly_cost
            };
            Some(ProjectionPoint {
                day,
                projected_monthly_cost,
            })
        })
        .collect();

    Projection { naive, smart }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[f64]) -> Vec<NormalizedPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| NormalizedPoint {
                day: start + chrono::Days::new(i as u64),
                value,
            })
            .collect()
    }

    #[test]
    fn test_short_series_is_empty() {
        let tariff = TariffConfig::default();
        assert_eq!(project(&[], &tariff, &[]), Projection::default());
        let single = project(&points(&[1.0]), &tariff, &[]);
        assert!(single.naive.is_empty() && single.smart.is_empty());
    }

    #[test]
    fn test_naive_projection_of_constant_usage() {
        let tariff = TariffConfig::default();
        let series = points(&[0.0, 1.0, 2.0, 3.0]);
        let projection = project(&series, &tariff, &[]);

        assert_eq!(projection.naive.len(), 3);
        let expected = tariff.cost(1.0, 1.0) * 30.0;
        for p in &projection.naive {
            assert!((p.projected_monthly_cost - expected).abs() < 1e-9);
        }
        assert_eq!(projection.naive, projection.smart);
    }

    #[test]
    fn test_smart_skips_flagged_days() {
        let tariff = TariffConfig::default();
        let series = points(&[0.0, 1.0, 11.0, 12.0]);
        let projection = project(&series, &tariff, &[false, true, false]);

        let normal = tariff.cost(1.0, 1.0) * 30.0;
        assert!((projection.smart[2].projected_monthly_cost - normal).abs() < 1e-9);
        assert!(projection.naive[2].projected_monthly_cost > normal);
    }

    #[test]
    fn test_all_flagged_falls_back_to_naive() {
        let tariff = TariffConfig::default();
        let series = points(&[0.0, 4.0, 5.0, 9.0]);
        let projection = project(&series, &tariff, &[true, true, true]);
        assert_eq!(projection.smart, projection.naive);
    }

    #[test]
    fn test_leading_flags_fall_back_until_first_normal_day() {
        let tariff = TariffConfig::default();
        let series = points(&[0.0, 9.0, 10.0]);
        let projection = project(&series, &tariff, &[true, false]);

        assert_eq!(projection.smart[0], projection.naive[0]);
        let normal = tariff.cost(1.0, 1.0) * 30.0;
        assert!((projection.smart[1].projected_monthly_cost - normal).abs() < 1e-9);
    }
}
