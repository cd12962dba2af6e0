//! Statistics module for gasmeter
//!
//! This module provides the statistical models run over daily observations:
//! usage-vs-temperature regression, anomalous-day detection and heating
//! degree-day efficiency.

pub mod descriptive;
mod anomaly;
mod efficiency;
mod regression;

pub use anomaly::{AnomalyDetector, AnomalySettings, AnomalySignals, AnomalyVerdict};

pub use efficiency::{degree_day_efficiency, EfficiencyPoint, HEATING_BASE_TEMPERATURE};

pub use regression::{Confidence, RegressionModel, MIN_REGRESSION_SAMPLES};
