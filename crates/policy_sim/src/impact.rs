//! Economic and public-health impact of a projected scenario.
//!
//! Productivity loss and healthcare burden describe the *present-day* burden
//! of the baseline AQI; they are saturating linear functions of it. The
//! scenario's benefit is expressed separately through the protected-population
//! estimate and the health-impact tier reduction.

use serde::{Deserialize, Serialize};

use crate::numeric::{clamp_percent, non_negative, round_half_up, sanitize};

/// AQI at which productivity loss reaches 100%.
const PRODUCTIVITY_SATURATION_AQI: f64 = 300.0;
/// AQI at which healthcare burden reaches 100%.
const HEALTHCARE_SATURATION_AQI: f64 = 250.0;

/// Baseline PM2.5 above which each AQI point affects more people.
pub const PM25_HAZARD_THRESHOLD: f64 = 100.0;
/// People protected per AQI point of improvement at hazardous PM2.5.
pub const HAZARD_EXPOSURE_MULTIPLIER: f64 = 18.0;
/// People protected per AQI point of improvement otherwise.
pub const BASE_EXPOSURE_MULTIPLIER: f64 = 12.0;

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

/// Qualitative economic risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    /// Map a 0–100 risk score: ≤20 Low, ≤40 Moderate, ≤60 High, else Extreme.
    pub fn from_score(score: f64) -> Self {
        let s = sanitize(score);
        if s <= 20.0 {
            RiskLevel::Low
        } else if s <= 40.0 {
            RiskLevel::Moderate
        } else if s <= 60.0 {
            RiskLevel::High
        } else {
            RiskLevel::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }
}

// ---------------------------------------------------------------------------
// Assessment record
// ---------------------------------------------------------------------------

/// Derived impact metrics for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    /// `clamp(baseline / 300 * 100)`.
    pub productivity_loss_percent: f64,
    /// `clamp(baseline / 250 * 100)`.
    pub healthcare_burden_percent: f64,
    /// Rounded mean of the two percentages.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// People protected by the scenario; 0 unless the AQI improves.
    pub lives_protected_estimate: u64,
    /// Drop in health-impact tier between baseline and projection (≥ 0).
    pub health_impact_score: f64,
}

impl Default for ImpactAssessment {
    fn default() -> Self {
        assess_impact(0.0, 0.0, 0.0)
    }
}

/// Health-impact tier of an AQI: <50 → 5, <100 → 15, <150 → 30, <200 → 50,
/// otherwise 70.
pub fn health_impact_tier(aqi: f64) -> f64 {
    let a = non_negative(aqi);
    if a < 50.0 {
        5.0
    } else if a < 100.0 {
        15.0
    } else if a < 150.0 {
        30.0
    } else if a < 200.0 {
        50.0
    } else {
        70.0
    }
}

/// People per AQI point of improvement for a given baseline PM2.5.
pub fn exposure_multiplier(baseline_pm25: f64) -> f64 {
    if non_negative(baseline_pm25) > PM25_HAZARD_THRESHOLD {
        HAZARD_EXPOSURE_MULTIPLIER
    } else {
        BASE_EXPOSURE_MULTIPLIER
    }
}

/// Assess the present-day burden of `baseline_aqi` and the population
/// protected by moving to `projected_aqi`.
pub fn assess_impact(baseline_aqi: f64, projected_aqi: f64, baseline_pm25: f64) -> ImpactAssessment {
    let baseline = non_negative(baseline_aqi);
    let projected = non_negative(projected_aqi);

    let productivity_loss_percent = clamp_percent(baseline / PRODUCTIVITY_SATURATION_AQI * 100.0);
    let healthcare_burden_percent = clamp_percent(baseline / HEALTHCARE_SATURATION_AQI * 100.0);
    let risk_score =
        clamp_percent(round_half_up((productivity_loss_percent + healthcare_burden_percent) / 2.0));

    let improvement = baseline - projected;
    let lives_protected_estimate = if improvement > 0.0 {
        round_half_up(improvement * exposure_multiplier(baseline_pm25)) as u64
    } else {
        0
    };

    let health_impact_score =
        (health_impact_tier(baseline) - health_impact_tier(projected)).max(0.0);

    ImpactAssessment {
        productivity_loss_percent,
        healthcare_burden_percent,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        lives_protected_estimate,
        health_impact_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let a = assess_impact(250.0, 218.0, 150.0);
        assert!((a.productivity_loss_percent - 250.0 / 3.0).abs() < 1e-9);
        assert_eq!(a.healthcare_burden_percent, 100.0);
        assert_eq!(a.risk_score, 92.0);
        assert_eq!(a.risk_level, RiskLevel::Extreme);
        assert_eq!(a.lives_protected_estimate, 576);
        // Both 250 and 218 sit in the top tier.
        assert_eq!(a.health_impact_score, 0.0);
    }

    #[test]
    fn test_low_pm25_uses_base_multiplier() {
        let a = assess_impact(120.0, 100.0, 60.0);
        assert_eq!(a.lives_protected_estimate, 240);
        assert_eq!(exposure_multiplier(100.0), BASE_EXPOSURE_MULTIPLIER);
        assert_eq!(exposure_multiplier(100.5), HAZARD_EXPOSURE_MULTIPLIER);
    }

    #[test]
    fn test_no_improvement_protects_nobody() {
        assert_eq!(assess_impact(100.0, 100.0, 200.0).lives_protected_estimate, 0);
        assert_eq!(assess_impact(100.0, 130.0, 200.0).lives_protected_estimate, 0);
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(20.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(21.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(41.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(61.0), RiskLevel::Extreme);
        assert_eq!(RiskLevel::from_score(f64::NAN), RiskLevel::Low);
    }

    #[test]
    fn test_clean_air_is_low_risk() {
        let a = assess_impact(30.0, 30.0, 10.0);
        // (10 + 12) / 2 = 11
        assert_eq!(a.risk_score, 11.0);
        assert_eq!(a.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_percentages_saturate() {
        let a = assess_impact(900.0, 0.0, 500.0);
        assert_eq!(a.productivity_loss_percent, 100.0);
        assert_eq!(a.healthcare_burden_percent, 100.0);
        assert_eq!(a.risk_score, 100.0);
        assert_eq!(a.health_impact_score, 65.0);
    }

    #[test]
    fn test_health_impact_tiers() {
        assert_eq!(health_impact_tier(0.0), 5.0);
        assert_eq!(health_impact_tier(49.9), 5.0);
        assert_eq!(health_impact_tier(50.0), 15.0);
        assert_eq!(health_impact_tier(100.0), 30.0);
        assert_eq!(health_impact_tier(150.0), 50.0);
        assert_eq!(health_impact_tier(200.0), 70.0);
    }

    #[test]
    fn test_health_impact_score_never_negative() {
        let a = assess_impact(40.0, 180.0, 10.0);
        assert_eq!(a.health_impact_score, 0.0);
    }

    #[test]
    fn test_malformed_input_degrades_to_zero() {
        let a = assess_impact(f64::NAN, f64::INFINITY, f64::NAN);
        assert_eq!(a.productivity_loss_percent, 0.0);
        assert_eq!(a.healthcare_burden_percent, 0.0);
        assert_eq!(a.risk_score, 0.0);
        assert_eq!(a.lives_protected_estimate, 0);
    }

    #[test]
    fn test_default_is_zero_assessment() {
        let a = ImpactAssessment::default();
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert_eq!(a.lives_protected_estimate, 0);
    }
}
