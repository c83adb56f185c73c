//! Intervention levers and the auto-mode preset heuristic.
//!
//! A scenario is three independent percentages in [0, 100]: traffic
//! reduction, construction control and industrial control. Auto mode picks a
//! preset from whichever pollutant dominates the baseline.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::numeric::clamp_percent;
use crate::pollutants::PollutantReadings;

/// One policy scenario. Every lever is a percentage in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct InterventionLevels {
    #[serde(default)]
    pub traffic_reduction: f64,
    #[serde(default)]
    pub construction_control: f64,
    #[serde(default)]
    pub industrial_control: f64,
}

impl Default for InterventionLevels {
    /// The manual-mode starting point: every lever at 20%.
    fn default() -> Self {
        Self::new(20.0, 20.0, 20.0)
    }
}

impl InterventionLevels {
    /// Build a scenario, clamping each lever into [0, 100].
    pub fn new(traffic_reduction: f64, construction_control: f64, industrial_control: f64) -> Self {
        Self {
            traffic_reduction: clamp_percent(traffic_reduction),
            construction_control: clamp_percent(construction_control),
            industrial_control: clamp_percent(industrial_control),
        }
    }

    /// All levers at 0: the "do nothing" baseline.
    pub const NONE: Self = Self {
        traffic_reduction: 0.0,
        construction_control: 0.0,
        industrial_control: 0.0,
    };

    /// All levers at 100.
    pub const MAX: Self = Self {
        traffic_reduction: 100.0,
        construction_control: 100.0,
        industrial_control: 100.0,
    };

    /// Copy with every lever clamped into [0, 100] and NaN mapped to 0.
    ///
    /// Fields are public, so models call this before reading them.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.traffic_reduction,
            self.construction_control,
            self.industrial_control,
        )
    }

    /// True if any lever lies outside [0, 100] or is non-finite.
    pub fn needs_sanitizing(&self) -> bool {
        self.sanitized() != *self
    }
}

/// How the lever values were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub enum LeverMode {
    #[default]
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "auto")]
    Auto,
}

/// Preset applied when PM2.5 strictly dominates both PM10 and NO2.
pub const PM25_DOMINANT_PRESET: InterventionLevels = InterventionLevels {
    traffic_reduction: 45.0,
    construction_control: 25.0,
    industrial_control: 40.0,
};

/// Preset applied when PM10 exceeds PM2.5 (and PM2.5 does not dominate).
pub const PM10_DOMINANT_PRESET: InterventionLevels = InterventionLevels {
    traffic_reduction: 30.0,
    construction_control: 50.0,
    industrial_control: 25.0,
};

/// Fallback preset, effectively "NO2 dominant or tied".
pub const INDUSTRIAL_PRESET: InterventionLevels = InterventionLevels {
    traffic_reduction: 35.0,
    construction_control: 30.0,
    industrial_control: 45.0,
};

/// Choose an auto-mode preset from the dominant baseline pollutant.
///
/// Missing pollutants read as 0, so an empty baseline falls through to the
/// industrial preset.
pub fn auto_preset(baseline: &PollutantReadings) -> InterventionLevels {
    let pm25 = baseline.pm25();
    let pm10 = baseline.pm10();
    let no2 = baseline.no2();

    if pm25 > pm10 && pm25 > no2 {
        PM25_DOMINANT_PRESET
    } else if pm10 > pm25 {
        PM10_DOMINANT_PRESET
    } else {
        INDUSTRIAL_PRESET
    }
}

/// Levers to use for `mode`: the auto preset, or `manual` unchanged.
pub fn levers_for_mode(
    mode: LeverMode,
    baseline: &PollutantReadings,
    manual: InterventionLevels,
) -> InterventionLevels {
    match mode {
        LeverMode::Auto => auto_preset(baseline),
        LeverMode::Manual => manual,
    }
}
