//! Data models for station observations.
//!
//! This module contains the core data structures shared by the ingest,
//! analysis and report stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of daily measurement kept by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasurementKind {
    /// Daily maximum temperature
    Tmax,
    /// Daily minimum temperature
    Tmin,
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementKind::Tmax => write!(f, "TMAX"),
            MeasurementKind::Tmin => write!(f, "TMIN"),
        }
    }
}

impl MeasurementKind {
    /// All kinds the extractor understands.
    pub const ALL: [MeasurementKind; 2] = [MeasurementKind::Tmax, MeasurementKind::Tmin];

    /// Parse the element code of a row. Matching is exact: `tmax` is not `TMAX`.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "TMAX" => Some(MeasurementKind::Tmax),
            "TMIN" => Some(MeasurementKind::Tmin),
            _ => None,
        }
    }
}

/// One accepted row of the observation log, already converted to degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Station code (first column).
    pub station_id: String,
    /// Measurement kind (third column).
    pub kind: MeasurementKind,
    /// Calendar day: the date with its four-digit year removed (`MMDD`).
    pub day: String,
    /// Reading in degrees (raw tenths divided by ten).
    pub value: f64,
}

impl Observation {
    /// Key of the group this observation belongs to.
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.station_id.clone(), self.kind, self.day.clone())
    }
}

/// Identifies a group: one station, one kind, one calendar day across years.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub station_id: String,
    pub kind: MeasurementKind,
    pub day: String,
}

impl GroupKey {
    pub fn new(station_id: impl Into<String>, kind: MeasurementKind, day: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            kind,
            day: day.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.station_id, self.kind, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(MeasurementKind::parse("TMAX"), Some(MeasurementKind::Tmax));
        assert_eq!(MeasurementKind::parse("TMIN"), Some(MeasurementKind::Tmin));
        assert_eq!(MeasurementKind::parse("PRCP"), None);
        assert_eq!(MeasurementKind::parse("tmax"), None);
    }

    #[test]
    fn test_kind_display_matches_code() {
        for kind in MeasurementKind::ALL {
            assert_eq!(MeasurementKind::parse(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn test_observation_key() {
        let obs = Observation {
            station_id: "USW001".to_string(),
            kind: MeasurementKind::Tmin,
            day: "0101".to_string(),
            value: -5.0,
        };
        assert_eq!(obs.key(), GroupKey::new("USW001", MeasurementKind::Tmin, "0101"));
        assert_eq!(obs.key().to_string(), "USW001 TMIN 0101");
    }

    #[test]
    fn test_group_key_ordering() {
        let mut keys = vec![
            GroupKey::new("B", MeasurementKind::Tmax, "0101"),
            GroupKey::new("A", MeasurementKind::Tmin, "0101"),
            GroupKey::new("A", MeasurementKind::Tmax, "0102"),
            GroupKey::new("A", MeasurementKind::Tmax, "0101"),
        ];
        keys.sort();
        assert_eq!(keys[0], GroupKey::new("A", MeasurementKind::Tmax, "0101"));
        assert_eq!(keys[1], GroupKey::new("A", MeasurementKind::Tmax, "0102"));
        assert_eq!(keys[2], GroupKey::new("A", MeasurementKind::Tmin, "0101"));
        assert_eq!(keys[3], GroupKey::new("B", MeasurementKind::Tmax, "0101"));
    }
}
