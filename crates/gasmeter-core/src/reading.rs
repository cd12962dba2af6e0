//! Meter readings.
//!
//! A reading is a cumulative meter value (m³) captured at an instant. Readings
//! are immutable once created; the only lifecycle operation is deletion, which
//! belongs to whoever stores them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// Opaque unique identifier of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingId(Uuid);

impl ReadingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReadingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReadingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReadingId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::UnknownReading(s.to_string()))
    }
}

/// A timestamped cumulative meter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub timestamp: DateTime<Utc>,
    /// Cumulative meter value in m³
    pub value: f64,
}

impl Reading {
    /// Create a reading with a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if `value` is negative or not finite.
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Result<Self, ValidationError> {
        Self::with_id(ReadingId::new(), timestamp, value)
    }

    /// Create a reading with a caller-supplied id.
    pub fn with_id(
        id: ReadingId,
        timestamp: DateTime<Utc>,
        value: f64,
    ) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid("value", "meter value must be finite"));
        }
        if value < 0.0 {
            return Err(ValidationError::invalid(
                "value",
                format!("meter value must be non-negative, got {value}"),
            ));
        }
        Ok(Self { id, timestamp, value })
    }
}

/// Return a copy of `readings` ordered by timestamp.
///
/// The sort is stable, so readings sharing a timestamp keep their input order.
pub fn sorted_by_time(readings: &[Reading]) -> Vec<Reading> {
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}
