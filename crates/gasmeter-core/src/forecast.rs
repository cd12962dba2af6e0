//! Usage and cost forecast from upcoming temperatures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::{Confidence, RegressionModel};
use crate::tariff::TariffConfig;
use crate::weather::TemperatureStore;

/// At most this many forecast days are used.
pub const MAX_FORECAST_DAYS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: NaiveDate,
    pub predicted_usage: f64,
    pub temperature: f64,
}

/// Forecast summary. Every scalar is `None` when no forecast could be made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub average_temperature: Option<f64>,
    pub total_predicted_usage: Option<f64>,
    pub projected_cost: Option<f64>,
    pub confidence: Option<Confidence>,
    pub days: Vec<ForecastDay>,
    /// Why the forecast is missing, if it is
    pub unavailable_reason: Option<String>,
}

impl ForecastResult {
    /// Create an unavailable forecast with reason.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            average_temperature: None,
            total_predicted_usage: None,
            projected_cost: None,
            confidence: None,
            days: Vec::new(),
            unavailable_reason: Some(reason.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.unavailable_reason.is_none()
    }
}

/// Forecast from the future side of `store`.
pub fn forecast(
    model: Option<&RegressionModel>,
    store: &TemperatureStore,
    tariff: &TariffConfig,
) -> ForecastResult {
    let upcoming: BTreeMap<NaiveDate, f64> = store.forecast().collect();
    forecast_temperatures(model, &upcoming, tariff)
}

/// Forecast from an explicit map of future daily temperatures.
pub fn forecast_temperatures(
    model: Option<&RegressionModel>,
    upcoming: &BTreeMap<NaiveDate, f64>,
    tariff: &TariffConfig,
) -> ForecastResult {
    let Some(model) = model else {
        return ForecastResult::unavailable("No regression model (need at least 5 days with temperature data)");
    };
    if upcoming.is_empty() {
        return ForecastResult::unavailable("No forecast temperatures available");
    }

    let days: Vec<ForecastDay> = upcoming
        .iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(&day, &temperature)| ForecastDay {
            day,
            predicted_usage: model.predict(temperature).max(0.0),
            temperature,
        })
        .collect();

    let total: f64 = days.iter().map(|d| d.predicted_usage).sum();
    let average_temperature = days.iter().map(|d| d.temperature).sum::<f64>() / days.len() as f64;
    let projected_cost = tariff.cost(total, days.len() as f64);

    tracing::debug!(
        days = days.len(),
        total_usage = total,
        projected_cost,
        "composed usage forecast"
    );

    ForecastResult {
        average_temperature: Some(average_temperature),
        total_predicted_usage: Some(total),
        projected_cost: Some(projected_cost),
        confidence: Some(model.confidence()),
        days,
        unavailable_reason: None,
    }
}
