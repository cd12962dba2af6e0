//! Date-keyed temperature samples.
//!
//! One store holds both observed and forecast daily means. Which of the two a
//! sample is depends only on its date relative to the `today` the store was
//! built with, so the observed and forecast views can never overlap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Mean daily temperatures (°C) keyed by UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStore {
    today: NaiveDate,
    samples: BTreeMap<NaiveDate, f64>,
}

impl TemperatureStore {
    /// Empty store with the observed/forecast boundary at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            samples: BTreeMap::new(),
        }
    }

    /// Build from an undifferentiated sample map.
    pub fn from_samples(today: NaiveDate, samples: BTreeMap<NaiveDate, f64>) -> Self {
        let mut store = Self::new(today);
        for (day, temp) in samples {
            store.insert(day, temp);
        }
        store
    }

    /// Merge separately fetched observed and forecast caches.
    ///
    /// Observed values are kept only up to `today` and forecast values only
    /// after it; anything on the wrong side of the boundary is dropped.
    pub fn from_caches(
        today: NaiveDate,
        observed: &BTreeMap<NaiveDate, f64>,
        forecast: &BTreeMap<NaiveDate, f64>,
    ) -> Self {
        let mut store = Self::new(today);
        let mut dropped = 0usize;
        for (&day, &temp) in observed {
            if day <= today {
                store.insert(day, temp);
            } else {
                dropped += 1;
            }
        }
        for (&day, &temp) in forecast {
            if day > today {
                store.insert(day, temp);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, %today, "dropped temperature samples outside their cache's side of today");
        }
        store
    }

    /// Insert or replace a sample. Non-finite temperatures are ignored.
    pub fn insert(&mut self, day: NaiveDate, celsius: f64) {
        if celsius.is_finite() {
            self.samples.insert(day, celsius);
        } else {
            tracing::warn!(%day, "ignoring non-finite temperature sample");
        }
    }

    pub fn remove(&mut self, day: NaiveDate) -> Option<f64> {
        self.samples.remove(&day)
    }

    pub fn get(&self, day: NaiveDate) -> Option<f64> {
        self.samples.get(&day).copied()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether `day` falls on the observed side of the boundary.
    pub fn is_observed(&self, day: NaiveDate) -> bool {
        day <= self.today
    }

    /// Samples up to and including today, ascending.
    pub fn observed(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.samples.range(..=self.today).map(|(&d, &t)| (d, t))
    }

    /// Samples after today, ascending.
    pub fn forecast(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.samples
            .range((Bound::Excluded(self.today), Bound::Unbounded))
            .map(|(&d, &t)| (d, t))
    }

    pub fn samples(&self) -> &BTreeMap<NaiveDate, f64> {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
