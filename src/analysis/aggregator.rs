//! Reading aggregation and threshold filtering.
//!
//! This module holds the grouping store built during ingest and the
//! read-only queries used for counting and writing qualifying groups.

use crate::models::{GroupKey, Observation};
#[cfg(test)]
use crate::models::MeasurementKind;
use std::collections::{HashMap, HashSet};

/// Readings grouped by (station, kind, calendar day).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groupings {
    groups: HashMap<GroupKey, Vec<f64>>,
}

/// Diagnostic totals for a grouping at a given threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupingSummary {
    pub stations: usize,
    pub groups: usize,
    pub readings: usize,
    pub qualifying: usize,
}

impl Groupings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation's reading to its group.
    pub fn insert(&mut self, observation: Observation) {
        self.push(observation.key(), observation.value);
    }

    /// Append a reading, creating the group on first use.
    pub fn push(&mut self, key: GroupKey, value: f64) {
        self.groups.entry(key).or_default().push(value);
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of readings across all groups.
    pub fn reading_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of distinct stations.
    pub fn station_count(&self) -> usize {
        self.groups
            .keys()
            .map(|k| k.station_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Count groups with at least `min_samples` readings.
    pub fn count_qualifying(&self, min_samples: usize) -> usize {
        self.qualifying(min_samples).count()
    }

    /// Groups with at least `min_samples` readings, in map order.
    pub fn qualifying(&self, min_samples: usize) -> impl Iterator<Item = (&GroupKey, &[f64])> {
        self.groups
            .iter()
            .filter(move |(_, values)| values.len() >= min_samples)
            .map(|(key, values)| (key, values.as_slice()))
    }

    /// Qualifying groups sorted by station, kind, then day.
    pub fn qualifying_sorted(&self, min_samples: usize) -> Vec<(&GroupKey, &[f64])> {
        let mut groups: Vec<_> = self.qualifying(min_samples).collect();
        groups.sort_by(|a, b| a.0.cmp(b.0));
        groups
    }

    pub fn summary(&self, min_samples: usize) -> GroupingSummary {
        GroupingSummary {
            stations: self.station_count(),
            groups: self.len(),
            readings: self.reading_count(),
            qualifying: self.count_qualifying(min_samples),
        }
    }
}

#[cfg(test)]
impl Groupings {
    pub fn get(&self, key: &GroupKey) -> Option<&[f64]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Readings for a station/kind/day triple.
    pub fn readings(&self, station_id: &str, kind: MeasurementKind, day: &str) -> Option<&[f64]> {
        self.get(&GroupKey::new(station_id, kind, day))
    }
}
