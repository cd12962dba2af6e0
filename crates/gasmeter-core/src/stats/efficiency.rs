//! Heating efficiency in m³ per degree-day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeseries::DailyObservation;

/// Standard base temperature for heating degree-days (°C).
pub const HEATING_BASE_TEMPERATURE: f64 = 15.5;

/// Days with fewer degree-days than this are skipped to avoid tiny divisors.
const MIN_DEGREE_DAYS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPoint {
    pub day: NaiveDate,
    pub degree_days: f64,
    pub usage_per_degree_day: f64,
}

/// Usage per heating degree-day for every cold enough day with a temperature.
pub fn degree_day_efficiency(
    observations: &[DailyObservation],
    base_temperature: f64,
) -> Vec<EfficiencyPoint> {
    observations
        .iter()
        .filter_map(|obs| {
            let temp = obs.temperature?;
            let degree_days = base_temperature - temp;
            (degree_days > MIN_DEGREE_DAYS).then(|| EfficiencyPoint {
                day: obs.day,
                degree_days,
                usage_per_degree_day: obs.usage / degree_days,
            })
        })
        .collect()
}
