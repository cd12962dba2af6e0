//! Reading-to-reading summaries on the raw (non-normalized) series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::elapsed_days;
use crate::reading::{sorted_by_time, Reading, ReadingId};
use crate::tariff::{CostBreakdown, TariffConfig};

/// Consumption between a reading and the one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingInterval {
    pub reading_id: ReadingId,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub usage: f64,
    pub elapsed_days: f64,
    pub cost: f64,
}

/// One interval per reading after the chronologically first one.
pub fn intervals(readings: &[Reading], tariff: &TariffConfig) -> Vec<ReadingInterval> {
    sorted_by_time(readings)
        .windows(2)
        .map(|w| {
            let (prev, curr) = (&w[0], &w[1]);
            let usage = curr.value - prev.value;
            let days = elapsed_days(prev.timestamp, curr.timestamp);
            ReadingInterval {
                reading_id: curr.id,
                timestamp: curr.timestamp,
                value: curr.value,
                usage,
                elapsed_days: days,
                cost: tariff.cost(usage, days),
            }
        })
        .collect()
}

/// Totals between two readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: f64,
    pub usage: f64,
    pub cost: f64,
    /// `cost / days × 30`; absent for a zero-length range
    pub projected_monthly_cost: Option<f64>,
    pub breakdown: CostBreakdown,
}

impl RangeSummary {
    /// Summarise consumption between `a` and `b`, in either order.
    pub fn between(a: &Reading, b: &Reading, tariff: &TariffConfig) -> Self {
        let (start, end) = if a.timestamp <= b.timestamp { (a, b) } else { (b, a) };
        let days = elapsed_days(start.timestamp, end.timestamp);
        let usage = end.value - start.value;
        let breakdown = tariff.breakdown(usage, days);
        let cost = tariff.cost(usage, days);
        let projected_monthly_cost = (days > 0.0).then(|| cost / days * 30.0);

        Self {
            start: start.timestamp,
            end: end.timestamp,
            days,
            usage,
            cost,
            projected_monthly_cost,
            breakdown,
        }
    }

    /// First to last reading of `readings`, if there are at least two.
    pub fn whole(readings: &[Reading], tariff: &TariffConfig) -> Option<Self> {
        if readings.len() < 2 {
            return None;
        }
        let sorted = sorted_by_time(readings);
        Some(Self::between(&sorted[0], &sorted[sorted.len() - 1], tariff))
    }
}
