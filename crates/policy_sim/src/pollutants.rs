//! Pollutant identifiers, reading snapshots and per-pollutant severity bands.
//!
//! Band thresholds live in a single static table keyed by pollutant so that
//! classification stays separate from projection.
//!
//! | Pollutant | Good | Moderate | Poor | Severe |
//! |-----------|------|----------|------|--------|
//! | PM2.5     | ≤30  | ≤60      | ≤90  | >90    |
//! | PM10      | ≤50  | ≤100     | ≤250 | >250   |
//! | NO2       | ≤40  | ≤80      | ≤180 | >180   |
//! | SO2       | ≤40  | ≤80      | ≤380 | >380   |
//! | CO        | ≤2   | ≤4       | ≤10  | >10    |
//! | O3        | ≤50  | ≤100     | ≤168 | >168   |

use std::collections::BTreeMap;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::numeric::non_negative;

// ---------------------------------------------------------------------------
// Pollutant identifiers
// ---------------------------------------------------------------------------

/// A monitored pollutant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub enum Pollutant {
    #[serde(rename = "pm25")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "so2")]
    So2,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "o3")]
    O3,
}

impl Pollutant {
    /// Every pollutant, in threshold-table order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Wire key used by the monitoring API.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
            Pollutant::O3 => "o3",
        }
    }

    /// Parse a wire key. Unknown keys return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Reading snapshot
// ---------------------------------------------------------------------------

/// Immutable snapshot of pollutant concentrations (µg/m³ or the pollutant's
/// customary unit).
///
/// Values are stored non-negative and finite; absent pollutants read as 0.
/// On the wire this is a flat JSON object such as `{"pm25": 150, "no2": 80}`.
/// Unknown keys and `null` values are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[serde(
    from = "BTreeMap<String, Option<f64>>",
    into = "BTreeMap<String, f64>"
)]
pub struct PollutantReadings {
    values: BTreeMap<Pollutant, f64>,
}

impl PollutantReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the three pollutants the projection models.
    pub fn from_core(pm25: f64, pm10: f64, no2: f64) -> Self {
        Self::new()
            .with(Pollutant::Pm25, pm25)
            .with(Pollutant::Pm10, pm10)
            .with(Pollutant::No2, no2)
    }

    /// Builder-style setter.
    pub fn with(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.set(pollutant, value);
        self
    }

    /// Store a concentration. Negative and non-finite values are stored as 0.
    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        self.values.insert(pollutant, non_negative(value));
    }

    /// Concentration of `pollutant`, or 0 when it was never reported.
    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.values.get(&pollutant).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, pollutant: Pollutant) -> bool {
        self.values.contains_key(&pollutant)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reported pollutants in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.values.iter().map(|(&p, &v)| (p, v))
    }

    pub fn pm25(&self) -> f64 {
        self.get(Pollutant::Pm25)
    }

    pub fn pm10(&self) -> f64 {
        self.get(Pollutant::Pm10)
    }

    pub fn no2(&self) -> f64 {
        self.get(Pollutant::No2)
    }
}

impl From<BTreeMap<String, Option<f64>>> for PollutantReadings {
    fn from(raw: BTreeMap<String, Option<f64>>) -> Self {
        let mut readings = Self::new();
        for (key, value) in raw {
            if let (Some(pollutant), Some(value)) = (Pollutant::from_key(&key), value) {
                readings.set(pollutant, value);
            }
        }
        readings
    }
}

impl From<PollutantReadings> for BTreeMap<String, f64> {
    fn from(readings: PollutantReadings) -> Self {
        readings
            .values
            .into_iter()
            .map(|(p, v)| (p.key().to_string(), v))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Severity bands
// ---------------------------------------------------------------------------

/// Qualitative concentration band for a single pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PollutantBand {
    Good,
    Moderate,
    Poor,
    Severe,
}

impl PollutantBand {
    pub fn label(self) -> &'static str {
        match self {
            PollutantBand::Good => "Good",
            PollutantBand::Moderate => "Moderate",
            PollutantBand::Poor => "Poor",
            PollutantBand::Severe => "Severe",
        }
    }
}

/// Label reported for pollutant keys with no threshold entry.
pub const STATUS_UNAVAILABLE: &str = "Data Unavailable";

/// Inclusive upper bounds of the Good, Moderate and Poor bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandThresholds {
    pub pollutant: Pollutant,
    pub good_max: f64,
    pub moderate_max: f64,
    pub poor_max: f64,
}

/// Threshold table, one row per pollutant in [`Pollutant::ALL`] order.
pub const POLLUTANT_THRESHOLDS: [BandThresholds; 6] = [
    BandThresholds {
        pollutant: Pollutant::Pm25,
        good_max: 30.0,
        moderate_max: 60.0,
        poor_max: 90.0,
    },
    BandThresholds {
        pollutant: Pollutant::Pm10,
        good_max: 50.0,
        moderate_max: 100.0,
        poor_max: 250.0,
    },
    BandThresholds {
        pollutant: Pollutant::No2,
        good_max: 40.0,
        moderate_max: 80.0,
        poor_max: 180.0,
    },
    BandThresholds {
        pollutant: Pollutant::So2,
        good_max: 40.0,
        moderate_max: 80.0,
        poor_max: 380.0,
    },
    BandThresholds {
        pollutant: Pollutant::Co,
        good_max: 2.0,
        moderate_max: 4.0,
        poor_max: 10.0,
    },
    BandThresholds {
        pollutant: Pollutant::O3,
        good_max: 50.0,
        moderate_max: 100.0,
        poor_max: 168.0,
    },
];

/// Threshold row for `pollutant`.
pub fn thresholds(pollutant: Pollutant) -> &'static BandThresholds {
    &POLLUTANT_THRESHOLDS[pollutant.index()]
}

/// Classify a concentration. Non-finite or negative values count as 0.
pub fn classify(pollutant: Pollutant, value: f64) -> PollutantBand {
    let v = non_negative(value);
    let t = thresholds(pollutant);
    if v <= t.good_max {
        PollutantBand::Good
    } else if v <= t.moderate_max {
        PollutantBand::Moderate
    } else if v <= t.poor_max {
        PollutantBand::Poor
    } else {
        PollutantBand::Severe
    }
}

/// Status label for a wire key, or [`STATUS_UNAVAILABLE`] for unknown keys.
pub fn status_for_key(key: &str, value: f64) -> &'static str {
    Pollutant::from_key(key)
        .map(|p| classify(p, value).label())
        .unwrap_or(STATUS_UNAVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table_matches_pollutant_order() {
        for (i, p) in Pollutant::ALL.iter().enumerate() {
            assert_eq!(POLLUTANT_THRESHOLDS[i].pollutant, *p);
            assert_eq!(thresholds(*p).pollutant, *p);
        }
    }

    #[test]
    fn test_thresholds_strictly_increasing() {
        for t in POLLUTANT_THRESHOLDS.iter() {
            assert!(t.good_max < t.moderate_max, "{:?}", t.pollutant);
            assert!(t.moderate_max < t.poor_max, "{:?}", t.pollutant);
        }
    }

    #[test]
    fn test_classify_known_values() {
        assert_eq!(classify(Pollutant::Pm25, 45.0), PollutantBand::Moderate);
        assert_eq!(classify(Pollutant::Pm10, 150.0), PollutantBand::Poor);
        assert_eq!(classify(Pollutant::No2, 50.0), PollutantBand::Moderate);
        assert_eq!(classify(Pollutant::So2, 10.0), PollutantBand::Good);
        assert_eq!(classify(Pollutant::Co, 8.0), PollutantBand::Poor);
        assert_eq!(classify(Pollutant::O3, 75.0), PollutantBand::Moderate);
        assert_eq!(classify(Pollutant::Pm25, 91.0), PollutantBand::Severe);
    }

    #[test]
    fn test_classify_boundaries_are_inclusive() {
        assert_eq!(classify(Pollutant::Pm25, 30.0), PollutantBand::Good);
        assert_eq!(classify(Pollutant::Pm25, 60.0), PollutantBand::Moderate);
        assert_eq!(classify(Pollutant::Pm25, 90.0), PollutantBand::Poor);
    }

    #[test]
    fn test_classify_malformed_input_is_good() {
        assert_eq!(classify(Pollutant::Pm25, f64::NAN), PollutantBand::Good);
        assert_eq!(classify(Pollutant::Co, -4.0), PollutantBand::Good);
    }

    #[test]
    fn test_status_for_unknown_key() {
        assert_eq!(status_for_key("nh3", 10.0), STATUS_UNAVAILABLE);
        assert_eq!(status_for_key("pm25", 45.0), "Moderate");
    }

    #[test]
    fn test_readings_missing_keys_read_zero() {
        let r = PollutantReadings::new().with(Pollutant::Pm25, 12.0);
        assert_eq!(r.pm25(), 12.0);
        assert_eq!(r.pm10(), 0.0);
        assert!(!r.contains(Pollutant::No2));
    }

    #[test]
    fn test_readings_coerce_malformed_values() {
        let r = PollutantReadings::new()
            .with(Pollutant::Pm25, -5.0)
            .with(Pollutant::Pm10, f64::NAN);
        assert_eq!(r.pm25(), 0.0);
        assert_eq!(r.pm10(), 0.0);
    }

    #[test]
    fn test_readings_json_drops_unknown_and_null() {
        let json = r#"{"pm25": 150, "pm10": null, "nh3": 4, "no2": 80.5}"#;
        let r: PollutantReadings = serde_json::from_str(json).unwrap();
        assert_eq!(r.pm25(), 150.0);
        assert_eq!(r.no2(), 80.5);
        assert!(!r.contains(Pollutant::Pm10));
        assert_eq!(r.iter().count(), 2);
    }

    #[test]
    fn test_readings_serialize_as_flat_object() {
        let r = PollutantReadings::from_core(150.0, 200.0, 80.0);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["pm25"], 150.0);
        assert_eq!(value["pm10"], 200.0);
        assert_eq!(value["no2"], 80.0);
    }

    #[test]
    fn test_key_round_trip() {
        for p in Pollutant::ALL {
            assert_eq!(Pollutant::from_key(p.key()), Some(p));
        }
    }
}
