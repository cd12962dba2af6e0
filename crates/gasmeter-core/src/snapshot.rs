//! Immutable input record for one analysis run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::reading::{Reading, ReadingId};
use crate::tariff::TariffConfig;
use crate::weather::TemperatureStore;

/// Readings, tariff and temperatures as they stood when the analysis began.
///
/// The caller builds a snapshot and hands it to [`crate::analysis::analyze`];
/// the analytics never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterSnapshot {
    pub readings: Vec<Reading>,
    pub tariff: TariffConfig,
    pub temperatures: TemperatureStore,
}

impl MeterSnapshot {
    pub fn new(readings: Vec<Reading>, tariff: TariffConfig, temperatures: TemperatureStore) -> Self {
        Self {
            readings,
            tariff,
            temperatures,
        }
    }

    pub fn reading(&self, id: ReadingId) -> Option<&Reading> {
        self.readings.iter().find(|r| r.id == id)
    }

    /// Narrow to the readings between two selected readings, inclusive.
    ///
    /// The ids may be given in either order.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownReading`] if either id is absent.
    pub fn window(&self, from: ReadingId, to: ReadingId) -> Result<Self> {
        let a = self
            .reading(from)
            .ok_or_else(|| ValidationError::UnknownReading(from.to_string()))?;
        let b = self
            .reading(to)
            .ok_or_else(|| ValidationError::UnknownReading(to.to_string()))?;
        let (start, end) = if a.timestamp <= b.timestamp {
            (a.timestamp, b.timestamp)
        } else {
            (b.timestamp, a.timestamp)
        };

        let readings: Vec<Reading> = self
            .readings
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .cloned()
            .collect();

        tracing::debug!(
            %start,
            %end,
            kept = readings.len(),
            total = self.readings.len(),
            "narrowed snapshot to selected range"
        );

        Ok(Self {
            readings,
            tariff: self.tariff.clone(),
            temperatures: self.temperatures.clone(),
        })
    }
}
