//! Resampling of irregular readings onto a daily grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::start_of_day;
use crate::reading::{sorted_by_time, Reading};

/// Interpolated meter value at the start of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub day: NaiveDate,
    pub value: f64,
}

/// Resample `readings` to one point per UTC day.
///
/// The grid starts at midnight of the earliest reading's day and runs while
/// midnight is not after the latest reading. Days before the first reading
/// take its value; everything else is linearly interpolated between the
/// bracketing readings. Fewer than two readings yields an empty series.
pub fn normalize(readings: &[Reading]) -> Vec<NormalizedPoint> {
    if readings.len() < 2 {
        return Vec::new();
    }

    let sorted = sorted_by_time(readings);
    let first = &sorted[0];
    let last = &sorted[sorted.len() - 1];
    let end = last.timestamp;

    let mut points = Vec::new();
    let mut day = first.timestamp.date_naive();

    loop {
        let t = start_of_day(day);
        if t > end {
            break;
        }

        let next_idx = sorted.partition_point(|r| r.timestamp < t);
        let value = match next_idx {
            0 => first.value,
            i if i >= sorted.len() => last.value,
            i => interpolate(&sorted[i - 1], &sorted[i], t),
        };
        points.push(NormalizedPoint { day, value });

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    tracing::debug!(
        readings = readings.len(),
        points = points.len(),
        "normalized readings onto daily grid"
    );
    points
}

fn interpolate(prev: &Reading, next: &Reading, t: chrono::DateTime<chrono::Utc>) -> f64 {
    let span = (next.timestamp - prev.timestamp).num_milliseconds();
    if span == 0 {
        return prev.value;
    }
    let factor = (t - prev.timestamp).num_milliseconds() as f64 / span as f64;
    prev.value + factor * (next.value - prev.value)
}

/// Day-over-day differences: entry `i` is `points[i + 1] - points[i]`.
pub fn daily_usage(points: &[NormalizedPoint]) -> Vec<f64> {
    points.windows(2).map(|w| w[1].value - w[0].value).collect()
}
