//! Usage-vs-temperature linear regression.
//!
//! Fits `usage = slope × temperature + intercept` by ordinary least squares
//! over the days that have a temperature sample, and reports R² as the
//! goodness of fit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::timeseries::DailyObservation;

/// Minimum number of (temperature, usage) pairs needed for a fit.
pub const MIN_REGRESSION_SAMPLES: usize = 5;

/// Qualitative trust in a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Bucket a fit by R² and sample size.
    pub fn classify(r_squared: f64, sample_count: usize) -> Self {
        if r_squared > 0.7 && sample_count > 20 {
            Confidence::High
        } else if r_squared > 0.4 && sample_count > 10 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        };
        f.write_str(label)
    }
}

/// A fitted first-order model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 0.0 when usage has no variance
    pub r_squared: f64,
    pub sample_count: usize,
}

impl RegressionModel {
    /// Fit daily usage against temperature.
    ///
    /// Days without a temperature are left out. Returns `None` with fewer than
    /// [`MIN_REGRESSION_SAMPLES`] usable days or when every day has the same
    /// temperature (the slope is undefined).
    pub fn fit(observations: &[DailyObservation]) -> Option<Self> {
        let pairs: Vec<(f64, f64)> = observations
            .iter()
            .filter_map(|o| o.temperature.map(|t| (t, o.usage)))
            .collect();
        Self::fit_pairs(&pairs)
    }

    /// Fit raw `(x, y)` pairs.
    pub fn fit_pairs(pairs: &[(f64, f64)]) -> Option<Self> {
        if pairs.len() < MIN_REGRESSION_SAMPLES {
            tracing::debug!(samples = pairs.len(), "not enough samples for regression");
            return None;
        }

        let n = pairs.len() as f64;
        let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

        // Centred sums; the raw `n·Σx² − (Σx)²` form cancels catastrophically.
        let sxx: f64 = pairs.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        let sxy: f64 = pairs.iter().map(|p| (p.0 - mean_x) * (p.1 - mean_y)).sum();
        let sum_xx: f64 = pairs.iter().map(|p| p.0 * p.0).sum();
        if !has_spread(sxx, sum_xx) {
            tracing::debug!("temperature has no variance; slope undefined");
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = pairs.iter().map(|p| (p.1 - mean_y).powi(2)).sum();
        let sum_yy: f64 = pairs.iter().map(|p| p.1 * p.1).sum();
        let ss_res: f64 = pairs
            .iter()
            .map(|p| (p.1 - (slope * p.0 + intercept)).powi(2))
            .sum();
        let r_squared = if has_spread(ss_tot, sum_yy) {
            1.0 - ss_res / ss_tot
        } else {
            0.0
        };

        let model = Self {
            slope,
            intercept,
            r_squared,
            sample_count: pairs.len(),
        };
        tracing::debug!(
            slope = model.slope,
            intercept = model.intercept,
            r_squared = model.r_squared,
            samples = model.sample_count,
            "fitted usage/temperature regression"
        );
        Some(model)
    }

    /// Predicted usage at temperature `x`. May be negative.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn confidence(&self) -> Confidence {
        Confidence::classify(self.r_squared, self.sample_count)
    }
}

/// Whether a centred sum of squares is more than rounding noise relative to
/// the raw sum of squares of the same values.
fn has_spread(centred: f64, raw: f64) -> bool {
    centred > f64::EPSILON * raw
}
