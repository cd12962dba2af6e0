//! # gasmeter Core Library
//!
//! This library provides the analytics behind the gasmeter utility-meter
//! tracker. It turns cumulative meter readings taken at irregular times into
//! billing costs, consumption trends and short-term forecasts correlated with
//! outdoor temperature. The `gasmeter` CLI is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Normalizer**: resamples readings onto a contiguous daily grid
//! - **Cost model**: energy conversion, levy, VAT and fixed charges
//! - **Regression**: usage vs temperature by ordinary least squares
//! - **Anomaly detection**: IQR outliers plus trailing/temperature context
//! - **Projection**: naive and anomaly-excluding 30-day cost projections
//! - **Forecast**: upcoming usage and cost from forecast temperatures
//!
//! Every analytic is a pure function over a [`MeterSnapshot`]; nothing here
//! fetches data or holds global state.
//!
//! ## Key Components
//!
//! - [`analyze`]: Run the whole pipeline over a snapshot
//! - [`TariffConfig`]: Billing parameters
//! - [`TemperatureStore`]: Observed and forecast temperatures with a "today" boundary
//! - [`Config`]: Application configuration management

pub mod analysis;
pub mod error;
pub mod forecast;
pub mod projection;
pub mod reading;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod tariff;
pub mod timeseries;
pub mod weather;

pub use analysis::{analyze, AnalysisReport};
pub use error::{ConfigError, CoreError, ValidationError};
pub use forecast::{forecast, forecast_temperatures, ForecastDay, ForecastResult};
pub use projection::{project, Projection, ProjectionPoint};
pub use reading::{Reading, ReadingId};
pub use snapshot::MeterSnapshot;
pub use stats::{
    AnomalyDetector, AnomalySettings, AnomalyVerdict, Confidence, EfficiencyPoint, RegressionModel,
};
pub use storage::{Config, DataFile};
pub use tariff::{CostBreakdown, TariffConfig};
pub use timeseries::{
    daily_observations, normalize, DailyObservation, NormalizedPoint, RangeSummary,
    ReadingInterval,
};
pub use weather::TemperatureStore;
