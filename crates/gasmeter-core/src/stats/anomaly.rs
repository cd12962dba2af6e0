//! Anomalous-day detection.
//!
//! A day is anomalous when its usage rate is an IQR outlier, when its daily
//! cost is an upper IQR outlier, or when it both deviates from the recent
//! trailing average and is implausible given the day's temperature.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::descriptive::{iqr_fences, mean, median, std_dev};
use crate::error::ValidationError;
use crate::timeseries::DailyObservation;

/// Thresholds for [`AnomalyDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySettings {
    /// Tukey multiplier for usage-rate fences
    #[serde(default = "default_rate_iqr_multiplier")]
    pub rate_iqr_multiplier: f64,
    /// Tukey multiplier for the upper daily-cost fence
    #[serde(default = "default_cost_iqr_multiplier")]
    pub cost_iqr_multiplier: f64,
    /// Number of prior days kept for the recent-deviation check
    #[serde(default = "default_trailing_window")]
    pub trailing_window: usize,
    /// Prior days required before the recent-deviation check applies
    #[serde(default = "default_min_trailing_samples")]
    pub min_trailing_samples: usize,
    /// Standard deviations from the trailing mean that count as a deviation
    #[serde(default = "default_deviation_sigmas")]
    pub deviation_sigmas: f64,
    /// Observations (and temperature samples) required for the temperature check
    #[serde(default = "default_min_temperature_samples")]
    pub min_temperature_samples: usize,
    /// °C away from the window mean that makes a day warm or cold
    #[serde(default = "default_temperature_delta")]
    pub temperature_delta: f64,
    /// Rate above `median × this` on a warm day is suspicious
    #[serde(default = "default_warm_rate_ratio")]
    pub warm_rate_ratio: f64,
    /// Rate below `median × this` on a cold day is suspicious
    #[serde(default = "default_cold_rate_ratio")]
    pub cold_rate_ratio: f64,
}

fn default_rate_iqr_multiplier() -> f64 {
    1.5
}
fn default_cost_iqr_multiplier() -> f64 {
    2.0
}
fn default_trailing_window() -> usize {
    7
}
fn default_min_trailing_samples() -> usize {
    4
}
fn default_deviation_sigmas() -> f64 {
    2.5
}
fn default_min_temperature_samples() -> usize {
    10
}
fn default_temperature_delta() -> f64 {
    5.0
}
fn default_warm_rate_ratio() -> f64 {
    1.8
}
fn default_cold_rate_ratio() -> f64 {
    0.3
}

impl Default for AnomalySettings {
    fn default() -> Self {
        Self {
            rate_iqr_multiplier: default_rate_iqr_multiplier(),
            cost_iqr_multiplier: default_cost_iqr_multiplier(),
            trailing_window: default_trailing_window(),
            min_trailing_samples: default_min_trailing_samples(),
            deviation_sigmas: default_deviation_sigmas(),
            min_temperature_samples: default_min_temperature_samples(),
            temperature_delta: default_temperature_delta(),
            warm_rate_ratio: default_warm_rate_ratio(),
            cold_rate_ratio: default_cold_rate_ratio(),
        }
    }
}

impl AnomalySettings {
    /// Check every multiplier and ratio is finite and non-negative and the
    /// trailing window holds at least one day.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("rate_iqr_multiplier", self.rate_iqr_multiplier),
            ("cost_iqr_multiplier", self.cost_iqr_multiplier),
            ("deviation_sigmas", self.deviation_sigmas),
            ("temperature_delta", self.temperature_delta),
            ("warm_rate_ratio", self.warm_rate_ratio),
            ("cold_rate_ratio", self.cold_rate_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::invalid(
                    name,
                    format!("expected a finite non-negative number, got {value}"),
                ));
            }
        }
        if self.trailing_window == 0 {
            return Err(ValidationError::invalid(
                "trailing_window",
                "must keep at least one prior day",
            ));
        }
        Ok(())
    }
}

/// Individual signals evaluated for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalySignals {
    pub rate_outlier: bool,
    pub cost_outlier: bool,
    pub recent_deviation: bool,
    pub temperature_anomaly: bool,
}

impl AnomalySignals {
    pub fn is_anomalous(&self) -> bool {
        self.rate_outlier || self.cost_outlier || (self.recent_deviation && self.temperature_anomaly)
    }
}

/// Classification of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyVerdict {
    pub day: NaiveDate,
    pub anomalous: bool,
    pub signals: AnomalySignals,
}

/// Statistics shared by every day of a window.
struct WindowStats {
    rate_fences: (f64, f64),
    cost_upper: f64,
    median_rate: Option<f64>,
    avg_temperature: Option<f64>,
}

/// Classifies days of an observation window.
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    pub settings: AnomalySettings,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnomalySettings) -> Self {
        Self { settings }
    }

    /// One verdict per observation, in input order.
    ///
    /// The window is assumed chronological. Nothing carries over between
    /// calls: identical input always yields identical verdicts.
    pub fn classify(&self, observations: &[DailyObservation]) -> Vec<AnomalyVerdict> {
        let Some(stats) = self.window_stats(observations) else {
            return Vec::new();
        };

        let s = &self.settings;
        let mut trailing: VecDeque<f64> = VecDeque::with_capacity(s.trailing_window + 1);
        let mut verdicts = Vec::with_capacity(observations.len());

        for obs in observations {
            let rate = obs.rate();
            let mut signals = AnomalySignals {
                rate_outlier: rate < stats.rate_fences.0 || rate > stats.rate_fences.1,
                cost_outlier: obs.daily_cost > stats.cost_upper,
                ..AnomalySignals::default()
            };

            if !signals.rate_outlier && !signals.cost_outlier {
                signals.recent_deviation = self.deviates_from_recent(rate, &trailing);
                signals.temperature_anomaly =
                    self.implausible_for_temperature(obs, rate, observations.len(), &stats);
            }

            trailing.push_back(rate);
            if trailing.len() > s.trailing_window {
                trailing.pop_front();
            }

            verdicts.push(AnomalyVerdict {
                day: obs.day,
                anomalous: signals.is_anomalous(),
                signals,
            });
        }

        let flagged = verdicts.iter().filter(|v| v.anomalous).count();
        tracing::debug!(days = verdicts.len(), flagged, "classified observation window");
        verdicts
    }

    /// Boolean flags, one per observation.
    pub fn flags(&self, observations: &[DailyObservation]) -> Vec<bool> {
        self.classify(observations).iter().map(|v| v.anomalous).collect()
    }

    fn window_stats(&self, observations: &[DailyObservation]) -> Option<WindowStats> {
        let rates: Vec<f64> = observations.iter().map(DailyObservation::rate).collect();
        let costs: Vec<f64> = observations.iter().map(|o| o.daily_cost).collect();

        let rate_fences = iqr_fences(&rates, self.settings.rate_iqr_multiplier)?;
        let (_, cost_upper) = iqr_fences(&costs, self.settings.cost_iqr_multiplier)?;

        let temperatures: Vec<f64> = observations.iter().filter_map(|o| o.temperature).collect();
        let avg_temperature = if temperatures.len() >= self.settings.min_temperature_samples {
            mean(&temperatures)
        } else {
            None
        };

        Some(WindowStats {
            rate_fences,
            cost_upper,
            median_rate: median(&rates),
            avg_temperature,
        })
    }

    fn deviates_from_recent(&self, rate: f64, trailing: &VecDeque<f64>) -> bool {
        if trailing.len() < self.settings.min_trailing_samples {
            return false;
        }
        let prior: Vec<f64> = trailing.iter().copied().collect();
        match (mean(&prior), std_dev(&prior)) {
            (Some(m), Some(sd)) => (rate - m).abs() > self.settings.deviation_sigmas * sd,
            _ => false,
        }
    }

    fn implausible_for_temperature(
        &self,
        obs: &DailyObservation,
        rate: f64,
        window_len: usize,
        stats: &WindowStats,
    ) -> bool {
        let s = &self.settings;
        if window_len < s.min_temperature_samples {
            return false;
        }
        let (Some(temp), Some(avg), Some(median_rate)) =
            (obs.temperature, stats.avg_temperature, stats.median_rate)
        else {
            return false;
        };

        let warm_and_high = temp > avg + s.temperature_delta && rate > s.warm_rate_ratio * median_rate;
        let cold_and_low = temp < avg - s.temperature_delta && rate < s.cold_rate_ratio * median_rate;
        warm_and_high || cold_and_low
    }
}
