//! Composite AQI projection under an intervention scenario.
//!
//! The canonical model ([`AqiModel::Weighted`]) raises each lever to its own
//! exponent, weights the three effects, and scales their sum by how polluted
//! the projected air still is:
//!
//! ```text
//! weighted   = pm25*0.5 + pm10*0.3 + no2*0.2
//! normalized = min(1, weighted / 300)
//! effect     = ((t/100)^1.2*0.25 + (c/100)^1.1*0.30 + (i/100)^1.3*0.35) * normalized
//! projected  = max(0, round(aqi - aqi*effect))
//! ```
//!
//! [`AqiModel::Linear`] is the older single-weight blend applied straight to
//! the baseline AQI. Exactly one model is used per evaluation.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::levers::InterventionLevels;
use crate::numeric::{non_negative, round_half_up};
use crate::pollutant_projection::project_pollutants;
use crate::pollutants::PollutantReadings;

// ---------------------------------------------------------------------------
// Weighted model constants
// ---------------------------------------------------------------------------

const PM25_POLLUTION_WEIGHT: f64 = 0.5;
const PM10_POLLUTION_WEIGHT: f64 = 0.3;
const NO2_POLLUTION_WEIGHT: f64 = 0.2;

/// Weighted pollution at which lever effects reach full strength.
const POLLUTION_SATURATION: f64 = 300.0;

const TRAFFIC_EXPONENT: f64 = 1.2;
const TRAFFIC_EFFECT_WEIGHT: f64 = 0.25;
const CONSTRUCTION_EXPONENT: f64 = 1.1;
const CONSTRUCTION_EFFECT_WEIGHT: f64 = 0.30;
const INDUSTRY_EXPONENT: f64 = 1.3;
const INDUSTRY_EFFECT_WEIGHT: f64 = 0.35;

// ---------------------------------------------------------------------------
// Linear model constants
// ---------------------------------------------------------------------------

const LINEAR_TRAFFIC_WEIGHT: f64 = 0.4;
const LINEAR_CONSTRUCTION_WEIGHT: f64 = 0.3;
const LINEAR_INDUSTRIAL_WEIGHT: f64 = 0.3;

/// Which AQI projection formula to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub enum AqiModel {
    /// Exponentiated lever effects scaled by projected pollution.
    #[default]
    #[serde(rename = "weighted")]
    Weighted,
    /// Single-weight linear blend of the levers, ignoring pollutant levels.
    #[serde(rename = "linear")]
    Linear,
}

/// Per-lever effect breakdown of the weighted model, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverEffects {
    pub traffic: f64,
    pub construction: f64,
    pub industry: f64,
}

impl LeverEffects {
    pub fn total(&self) -> f64 {
        self.traffic + self.construction + self.industry
    }
}

/// Un-normalized lever effects for the weighted model.
pub fn lever_effects(levers: &InterventionLevels) -> LeverEffects {
    let l = levers.sanitized();
    LeverEffects {
        traffic: (l.traffic_reduction / 100.0).powf(TRAFFIC_EXPONENT) * TRAFFIC_EFFECT_WEIGHT,
        construction: (l.construction_control / 100.0).powf(CONSTRUCTION_EXPONENT)
            * CONSTRUCTION_EFFECT_WEIGHT,
        industry: (l.industrial_control / 100.0).powf(INDUSTRY_EXPONENT) * INDUSTRY_EFFECT_WEIGHT,
    }
}

/// `min(1, weighted pollution / 300)` for the projected concentrations.
pub fn normalized_pollution_factor(projected: &PollutantReadings) -> f64 {
    let weighted = projected.pm25() * PM25_POLLUTION_WEIGHT
        + projected.pm10() * PM10_POLLUTION_WEIGHT
        + projected.no2() * NO2_POLLUTION_WEIGHT;
    (weighted / POLLUTION_SATURATION).min(1.0)
}

/// Canonical weighted AQI projection.
pub fn project_aqi(
    baseline_aqi: f64,
    projected: &PollutantReadings,
    levers: &InterventionLevels,
) -> f64 {
    let base = non_negative(baseline_aqi);
    let combined = lever_effects(levers).total() * normalized_pollution_factor(projected);
    round_half_up(base - base * combined).max(0.0)
}

/// Legacy linear AQI projection.
pub fn project_aqi_linear(baseline_aqi: f64, levers: &InterventionLevels) -> f64 {
    let base = non_negative(baseline_aqi);
    let l = levers.sanitized();
    let total = (l.traffic_reduction * LINEAR_TRAFFIC_WEIGHT
        + l.construction_control * LINEAR_CONSTRUCTION_WEIGHT
        + l.industrial_control * LINEAR_INDUSTRIAL_WEIGHT)
        / 100.0;
    round_half_up(base * (1.0 - total)).max(0.0)
}

/// Dispatch to the formula selected by `model`.
pub fn project_aqi_with(
    model: AqiModel,
    baseline_aqi: f64,
    projected: &PollutantReadings,
    levers: &InterventionLevels,
) -> f64 {
    match model {
        AqiModel::Weighted => project_aqi(baseline_aqi, projected, levers),
        AqiModel::Linear => project_aqi_linear(baseline_aqi, levers),
    }
}

// ---------------------------------------------------------------------------
// Projection record
// ---------------------------------------------------------------------------

/// Output of one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub baseline_aqi: f64,
    pub projected_pollutants: PollutantReadings,
    /// Whole, non-negative AQI.
    pub projected_aqi: f64,
    /// `baseline_aqi - projected_aqi`.
    pub improvement: f64,
    /// Improvement as a rounded percentage of the baseline (0 when the
    /// baseline is 0).
    pub improvement_percent: f64,
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self {
            baseline_aqi: 0.0,
            projected_pollutants: PollutantReadings::from_core(0.0, 0.0, 0.0),
            projected_aqi: 0.0,
            improvement: 0.0,
            improvement_percent: 0.0,
        }
    }
}

/// Run the pollutant and AQI projections for one scenario.
pub fn simulate(
    baseline_aqi: f64,
    baseline: &PollutantReadings,
    levers: &InterventionLevels,
    model: AqiModel,
) -> ProjectionResult {
    let base = non_negative(baseline_aqi);
    let projected_pollutants = project_pollutants(baseline, levers);
    let projected_aqi = project_aqi_with(model, base, &projected_pollutants, levers);
    let improvement = base - projected_aqi;
    let improvement_percent = if base > 0.0 {
        round_half_up(improvement / base * 100.0)
    } else {
        0.0
    };

    ProjectionResult {
        baseline_aqi: base,
        projected_pollutants,
        projected_aqi,
        improvement,
        improvement_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> (PollutantReadings, InterventionLevels) {
        (
            PollutantReadings::from_core(150.0, 200.0, 80.0),
            InterventionLevels::new(50.0, 50.0, 50.0),
        )
    }

    #[test]
    fn test_reference_scenario_weighted() {
        let (baseline, levers) = reference();
        let result = simulate(250.0, &baseline, &levers, AqiModel::Weighted);
        assert_eq!(result.projected_aqi, 218.0);
        assert_eq!(result.improvement, 32.0);
        assert_eq!(result.improvement_percent, 13.0);
    }

    #[test]
    fn test_reference_scenario_linear() {
        let (baseline, levers) = reference();
        // total = (20 + 15 + 15) / 100 = 0.5
        let result = simulate(250.0, &baseline, &levers, AqiModel::Linear);
        assert_eq!(result.projected_aqi, 125.0);
        assert_eq!(result.improvement, 125.0);
        assert_eq!(result.improvement_percent, 50.0);
    }

    #[test]
    fn test_normalized_factor_saturates() {
        let heavy = PollutantReadings::from_core(1000.0, 1000.0, 1000.0);
        assert_eq!(normalized_pollution_factor(&heavy), 1.0);
        let clean = PollutantReadings::new();
        assert_eq!(normalized_pollution_factor(&clean), 0.0);
    }

    #[test]
    fn test_clean_air_cannot_be_reduced() {
        let clean = PollutantReadings::new();
        let aqi = project_aqi(80.0, &clean, &InterventionLevels::MAX);
        assert_eq!(aqi, 80.0);
    }

    #[test]
    fn test_zero_levers_keep_baseline_aqi() {
        let (baseline, _) = reference();
        for model in [AqiModel::Weighted, AqiModel::Linear] {
            let result = simulate(250.0, &baseline, &InterventionLevels::NONE, model);
            assert_eq!(result.projected_aqi, 250.0, "{model:?}");
            assert_eq!(result.improvement, 0.0);
        }
    }

    #[test]
    fn test_max_effects_sum() {
        let e = lever_effects(&InterventionLevels::MAX);
        assert!((e.total() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_linear_max_levers_floor_at_zero() {
        assert_eq!(project_aqi_linear(300.0, &InterventionLevels::MAX), 0.0);
    }

    #[test]
    fn test_zero_baseline_has_zero_percent() {
        let (baseline, levers) = reference();
        let result = simulate(0.0, &baseline, &levers, AqiModel::Weighted);
        assert_eq!(result.projected_aqi, 0.0);
        assert_eq!(result.improvement_percent, 0.0);
    }

    #[test]
    fn test_malformed_baseline_aqi_reads_zero() {
        let (baseline, levers) = reference();
        let result = simulate(f64::NAN, &baseline, &levers, AqiModel::Weighted);
        assert_eq!(result.baseline_aqi, 0.0);
        assert_eq!(result.projected_aqi, 0.0);
        let negative = simulate(-40.0, &baseline, &levers, AqiModel::Weighted);
        assert_eq!(negative.baseline_aqi, 0.0);
    }

    #[test]
    fn test_model_serde_names() {
        assert_eq!(serde_json::to_string(&AqiModel::Weighted).unwrap(), "\"weighted\"");
        let m: AqiModel = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(m, AqiModel::Linear);
    }
}
