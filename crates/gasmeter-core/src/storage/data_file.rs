//! JSON file holding readings and temperature samples.
//!
//! Stored at `~/.config/gasmeter/data.json`:
//!
//! ```json
//! { "readings": [{ "id": "…", "timestamp": "2024-01-01T08:00:00Z", "value": 100.0 }],
//!   "temperatures": { "2024-01-01": 4.2 } }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;
use crate::reading::{sorted_by_time, Reading, ReadingId};
use crate::snapshot::MeterSnapshot;
use crate::tariff::TariffConfig;
use crate::weather::TemperatureStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub temperatures: BTreeMap<NaiveDate, f64>,
}

impl DataFile {
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("data.json"))
    }

    /// Load from `path`; a missing file is an empty data set.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write as pretty JSON, readings in chronological order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let ordered = Self {
            readings: sorted_by_time(&self.readings),
            temperatures: self.temperatures.clone(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&ordered)?)?;
        Ok(())
    }

    pub fn add_reading(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Remove a reading; returns whether it existed.
    pub fn delete_reading(&mut self, id: ReadingId) -> bool {
        let before = self.readings.len();
        self.readings.retain(|r| r.id != id);
        self.readings.len() != before
    }

    pub fn set_temperature(&mut self, day: NaiveDate, celsius: f64) {
        self.temperatures.insert(day, celsius);
    }

    /// Freeze the current contents into an analysis input.
    pub fn snapshot(&self, tariff: TariffConfig, today: NaiveDate) -> MeterSnapshot {
        MeterSnapshot::new(
            self.readings.clone(),
            tariff,
            TemperatureStore::from_samples(today, self.temperatures.clone()),
        )
    }
}
