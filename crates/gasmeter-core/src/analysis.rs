//! One-shot analysis of a [`MeterSnapshot`].
//!
//! Runs every component in dependency order and collects the results into a
//! plain, serializable report. Recomputation is wholesale: callers build a
//! new snapshot whenever any input changes and call [`analyze`] again.

use serde::{Deserialize, Serialize};

use crate::forecast::{forecast, ForecastResult};
use crate::projection::{project, Projection};
use crate::snapshot::MeterSnapshot;
use crate::stats::{
    degree_day_efficiency, AnomalyDetector, AnomalySettings, AnomalyVerdict, EfficiencyPoint,
    RegressionModel, HEATING_BASE_TEMPERATURE,
};
use crate::timeseries::{
    cumulative_costs, daily_observations, intervals, normalize, CumulativeCost,
    DailyObservation, NormalizedPoint, RangeSummary, ReadingInterval,
};

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub intervals: Vec<ReadingInterval>,
    pub summary: Option<RangeSummary>,
    pub normalized: Vec<NormalizedPoint>,
    pub observations: Vec<DailyObservation>,
    pub cumulative: Vec<CumulativeCost>,
    pub regression: Option<RegressionModel>,
    pub anomalies: Vec<AnomalyVerdict>,
    pub projection: Projection,
    pub forecast: ForecastResult,
    pub efficiency: Vec<EfficiencyPoint>,
}

impl AnalysisReport {
    pub fn anomalous_days(&self) -> usize {
        self.anomalies.iter().filter(|v| v.anomalous).count()
    }
}

/// Analyse the whole snapshot.
pub fn analyze(snapshot: &MeterSnapshot, settings: &AnomalySettings) -> AnalysisReport {
    let tariff = &snapshot.tariff;

    let normalized = normalize(&snapshot.readings);
    let observations = daily_observations(&normalized, tariff, &snapshot.temperatures);
    let regression = RegressionModel::fit(&observations);

    let detector = AnomalyDetector::with_settings(settings.clone());
    let anomalies = detector.classify(&observations);
    let flags: Vec<bool> = anomalies.iter().map(|v| v.anomalous).collect();
    let projection = project(&normalized, tariff, &flags);

    let forecast = forecast(regression.as_ref(), &snapshot.temperatures, tariff);

    tracing::debug!(
        readings = snapshot.readings.len(),
        days = normalized.len(),
        anomalous = flags.iter().filter(|f| **f).count(),
        has_model = regression.is_some(),
        "analysis complete"
    );

    AnalysisReport {
        intervals: intervals(&snapshot.readings, tariff),
        summary: RangeSummary::whole(&snapshot.readings, tariff),
        cumulative: cumulative_costs(&observations),
        efficiency: degree_day_efficiency(&observations, HEATING_BASE_TEMPERATURE),
        normalized,
        observations,
        regression,
        anomalies,
        projection,
        forecast,
    }
}
