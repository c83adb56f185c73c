//! Environmental Health Index: a 0–100 composite of air quality, hotspot
//! density and anomaly density.
//!
//! | Sub-score | Weight | Definition                                   |
//! |-----------|--------|----------------------------------------------|
//! | AQI       | 40%    | `100 - aqi/3`                                |
//! | Hotspots  | 30%    | `(1 - min(1, hotspots/stations)) * 100`      |
//! | Anomalies | 30%    | `100 - min(75, anomalies/window * 100)`      |
//!
//! Anomaly density is capped at 75% so a single noisy reporting window cannot
//! drive its sub-score to zero.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_percent, non_negative, round_half_up, safe_ratio};

const WEIGHT_AQI: f64 = 0.4;
const WEIGHT_HOTSPOT: f64 = 0.3;
const WEIGHT_ANOMALY: f64 = 0.3;

/// AQI points per point of AQI sub-score lost.
const AQI_IMPACT_DIVISOR: f64 = 3.0;

/// Reference station count used when none is supplied.
pub const DEFAULT_TOTAL_STATIONS: f64 = 40.0;
/// Trailing observation windows considered for anomaly density.
pub const DEFAULT_ANOMALY_WINDOW: f64 = 24.0;
/// Ceiling on anomaly density, in percent.
pub const DEFAULT_ANOMALY_CAP_PERCENT: f64 = 75.0;

/// Tunables for the index. Defaults match the reference dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct HealthIndexParams {
    pub total_stations: f64,
    pub anomaly_window: f64,
    pub anomaly_cap_percent: f64,
}

impl Default for HealthIndexParams {
    fn default() -> Self {
        Self {
            total_stations: DEFAULT_TOTAL_STATIONS,
            anomaly_window: DEFAULT_ANOMALY_WINDOW,
            anomaly_cap_percent: DEFAULT_ANOMALY_CAP_PERCENT,
        }
    }
}

/// Qualitative band of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    /// ≥80 Excellent, ≥60 Good, ≥40 Fair, ≥20 Poor, else Critical.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthStatus::Excellent
        } else if score >= 60.0 {
            HealthStatus::Good
        } else if score >= 40.0 {
            HealthStatus::Fair
        } else if score >= 20.0 {
            HealthStatus::Poor
        } else {
            HealthStatus::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
            HealthStatus::Critical => "Critical",
        }
    }
}

/// Composite index and its sub-scores.
///
/// Sub-scores are reported rounded half up, as the dashboard shows them. The
/// overall score is weighted from the unrounded sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndexResult {
    pub aqi_impact_score: f64,
    pub hotspot_score: f64,
    pub anomaly_score: f64,
    /// Hotspots as a percentage of stations (0–100).
    pub hotspot_density_percent: f64,
    /// Anomalies as a capped percentage of the observation window.
    pub anomaly_density_percent: f64,
    /// Rounded weighted sum (0–100).
    pub overall_score: f64,
    pub status: HealthStatus,
}

impl Default for HealthIndexResult {
    fn default() -> Self {
        compute_health_index(0.0, 0.0, 0.0, None)
    }
}

/// Anomaly density in percent, capped at 75.
///
/// A window that is missing or zero falls back to 24; a negative window, a
/// missing count or a non-positive count all yield 0.
pub fn anomaly_density(anomaly_count: f64, window: f64) -> f64 {
    anomaly_density_capped(anomaly_count, window, DEFAULT_ANOMALY_CAP_PERCENT)
}

fn anomaly_density_capped(anomaly_count: f64, window: f64, cap_percent: f64) -> f64 {
    let window = if window.is_finite() && window != 0.0 {
        window
    } else {
        DEFAULT_ANOMALY_WINDOW
    };
    safe_ratio(anomaly_count, window, cap_percent)
}

/// Compute the index with default tunables. `total_stations` overrides the
/// reference station count of 40.
pub fn compute_health_index(
    current_aqi: f64,
    hotspot_count: f64,
    anomaly_count: f64,
    total_stations: Option<f64>,
) -> HealthIndexResult {
    let mut params = HealthIndexParams::default();
    if let Some(stations) = total_stations {
        params.total_stations = stations;
    }
    compute_health_index_with(&params, current_aqi, hotspot_count, anomaly_count)
}

/// Compute the index with explicit tunables.
///
/// A non-positive or non-finite station count falls back to 40.
pub fn compute_health_index_with(
    params: &HealthIndexParams,
    current_aqi: f64,
    hotspot_count: f64,
    anomaly_count: f64,
) -> HealthIndexResult {
    let aqi_impact_score = clamp_percent(100.0 - non_negative(current_aqi) / AQI_IMPACT_DIVISOR);

    let stations = if params.total_stations.is_finite() && params.total_stations > 0.0 {
        params.total_stations
    } else {
        DEFAULT_TOTAL_STATIONS
    };
    let hotspot_density = (non_negative(hotspot_count) / stations).min(1.0);
    let hotspot_score = clamp_percent((1.0 - hotspot_density) * 100.0);

    let anomaly_density_percent =
        anomaly_density_capped(anomaly_count, params.anomaly_window, params.anomaly_cap_percent);
    let anomaly_score = clamp_percent(100.0 - anomaly_density_percent);

    let overall_score = round_half_up(clamp_percent(
        aqi_impact_score * WEIGHT_AQI + hotspot_score * WEIGHT_HOTSPOT + anomaly_score * WEIGHT_ANOMALY,
    ));

    HealthIndexResult {
        aqi_impact_score: round_half_up(aqi_impact_score),
        hotspot_score: round_half_up(hotspot_score),
        anomaly_score: round_half_up(anomaly_score),
        hotspot_density_percent: clamp_percent(hotspot_density * 100.0),
        anomaly_density_percent,
        overall_score,
        status: HealthStatus::from_score(overall_score),
    }
}
