pub mod analyze;
pub mod config;
pub mod cost;
pub mod forecast;
pub mod reading;
pub mod weather;

use chrono::Utc;
use gasmeter_core::{Config, DataFile, MeterSnapshot};
use std::path::{Path, PathBuf};

/// Data file location: the `--data` override or the default under the data dir.
pub fn data_path(data: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match data {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(DataFile::default_path()?),
    }
}

pub fn load_data(data: Option<&Path>) -> Result<(PathBuf, DataFile), Box<dyn std::error::Error>> {
    let path = data_path(data)?;
    let file = DataFile::load(&path)?;
    tracing::debug!(
        path = %path.display(),
        readings = file.readings.len(),
        temperatures = file.temperatures.len(),
        "loaded data file"
    );
    Ok((path, file))
}

/// Snapshot of the data file under the saved configuration, as of today.
pub fn load_snapshot(
    data: Option<&Path>,
) -> Result<(Config, MeterSnapshot), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (_, file) = load_data(data)?;
    let snapshot = file.snapshot(config.tariff.clone(), Utc::now().date_naive());
    Ok((config, snapshot))
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}
