//! Daily time series derived from irregular meter readings.
//!
//! Readings are resampled onto a contiguous grid of UTC calendar days
//! ([`normalize`]), adjacent grid points become [`DailyObservation`]s, and the
//! raw readings can also be summarised interval by interval.

mod daily;
mod interval;
mod normalize;

pub use daily::{cumulative_costs, daily_observations, CumulativeCost, DailyObservation};
pub use interval::{intervals, RangeSummary, ReadingInterval};
pub use normalize::{daily_usage, normalize, NormalizedPoint};

use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds in one day; elapsed time is measured in fractional days.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `from` to `to` (negative if `to` is earlier).
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// Whole calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}

/// UTC midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}
