//! AQI severity bands and condition-specific health risk.
//!
//! Severity follows the six-band scale used across the dashboard panels.
//! Condition risk maps an AQI onto Low / High / Critical using per-condition
//! limits, since sensitive groups cross into danger at different AQIs.

use serde::{Deserialize, Serialize};

use crate::numeric::non_negative;

// ---------------------------------------------------------------------------
// Severity bands
// ---------------------------------------------------------------------------

/// Six-band AQI severity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiSeverity {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    Severe,
    Hazardous,
}

impl AqiSeverity {
    /// Classify an AQI value. Band upper bounds are inclusive:
    ///
    /// - Good:                      0-50
    /// - Moderate:                 51-100
    /// - Unhealthy for Sensitive: 101-150
    /// - Unhealthy:               151-200
    /// - Severe:                  201-300
    /// - Hazardous:               301+
    pub fn from_aqi(aqi: f64) -> Self {
        let a = non_negative(aqi);
        if a <= 50.0 {
            Self::Good
        } else if a <= 100.0 {
            Self::Moderate
        } else if a <= 150.0 {
            Self::UnhealthyForSensitive
        } else if a <= 200.0 {
            Self::Unhealthy
        } else if a <= 300.0 {
            Self::Severe
        } else {
            Self::Hazardous
        }
    }

    /// 1 (Good) through 6 (Hazardous).
    pub fn level(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::Severe => "Severe",
            Self::Hazardous => "Hazardous",
        }
    }
}

// ---------------------------------------------------------------------------
// Condition risk
// ---------------------------------------------------------------------------

/// Pre-existing condition a citizen can check their risk for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HealthCondition {
    #[default]
    #[serde(rename = "asthma")]
    Asthma,
    #[serde(rename = "sinus")]
    Sinus,
    #[serde(rename = "heart")]
    Heart,
    #[serde(rename = "allergy")]
    Allergy,
}

impl HealthCondition {
    /// Parse a condition name case-insensitively; unknown names map to asthma.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sinus" => Self::Sinus,
            "heart" => Self::Heart,
            "allergy" => Self::Allergy,
            _ => Self::Asthma,
        }
    }

    fn profile(self) -> &'static ConditionProfile {
        match self {
            Self::Asthma => &ASTHMA,
            Self::Sinus => &SINUS,
            Self::Heart => &HEART,
            Self::Allergy => &ALLERGY,
        }
    }

    /// How polluted air affects people with this condition.
    pub fn description(self) -> &'static str {
        self.profile().description
    }
}

/// Advice for one condition in one risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionGuidance {
    pub dos: &'static [&'static str],
    pub donts: &'static [&'static str],
}

/// Per-condition thresholds and advisory text. Arrays are indexed by
/// [`ConditionRiskLevel`].
struct ConditionProfile {
    /// Inclusive AQI limit of the Low band.
    low_max: f64,
    /// Inclusive AQI limit of the High band.
    high_max: f64,
    badges: [&'static str; 3],
    description: &'static str,
    guidance: [ConditionGuidance; 3],
}

const ASTHMA: ConditionProfile = ConditionProfile {
    low_max: 100.0,
    high_max: 200.0,
    badges: [
        "Low Chances of Asthma flare-up",
        "High Chances of Asthma",
        "CRITICAL CHANCES OF ASTHMA",
    ],
    description: "Severe symptoms including intense wheezing, severe shortness of breath, \
                  significant chest tightness, and persistent coughing that may disrupt daily \
                  activities.",
    guidance: [
        ConditionGuidance {
            dos: &["Maintain normal medication.", "Ventilate rooms."],
            donts: &["Smoke indoors."],
        },
        ConditionGuidance {
            dos: &[
                "Avoid outdoors and keep windows closed.",
                "Take prescribed medications.",
                "Use air purifiers.",
            ],
            donts: &["Smoke areas.", "Outdoor exercise."],
        },
        ConditionGuidance {
            dos: &[
                "Strict isolation in HEPA rooms.",
                "Monitor peak flow values.",
                "Emergency meds ready.",
            ],
            donts: &["All outdoor exposure.", "Physical exertion."],
        },
    ],
};

const SINUS: ConditionProfile = ConditionProfile {
    low_max: 120.0,
    high_max: 220.0,
    badges: [
        "Minimal Sinus Irritation",
        "Elevated Sinus Risk",
        "SEVERE SINUS CONGESTION",
    ],
    description: "High particulate volume irritates facial membranes, causing facia pressure, \
                  chronic headaches, and severe nasal congestion.",
    guidance: [
        ConditionGuidance {
            dos: &["Drink water.", "Dust surfaces."],
            donts: &["Pollen heavy zones."],
        },
        ConditionGuidance {
            dos: &["Saline nasal rinses.", "Steam inhalation.", "Hydration."],
            donts: &["Strong perfumes.", "Dry/dusty rooms."],
        },
        ConditionGuidance {
            dos: &[
                "Antihistamines advised.",
                "Strict hydration.",
                "Warm facial compress.",
            ],
            donts: &["Air-conditioned dryers.", "Open window ventilation."],
        },
    ],
};

const HEART: ConditionProfile = ConditionProfile {
    low_max: 80.0,
    high_max: 180.0,
    badges: [
        "Normal Cardiac Stress",
        "High Cardiac Strain",
        "EXTREME CARDIAC RISK",
    ],
    description: "Pollutants entering the bloodstream trigger inflammatory responses, \
                  increasing myocardial load and biological stress.",
    guidance: [
        ConditionGuidance {
            dos: &["Normal activity.", "Check BP."],
            donts: &["Extreme fatigue."],
        },
        ConditionGuidance {
            dos: &[
                "Monitor heart rate.",
                "Limit physical stress.",
                "Filtered air.",
            ],
            donts: &["Intense cardio.", "Stressful environments."],
        },
        ConditionGuidance {
            dos: &[
                "Complete rest indoors.",
                "Emergency clinical contact.",
                "Monitor oxygen levels.",
            ],
            donts: &["Any exertion.", "Caffeine/stimulants."],
        },
    ],
};

const ALLERGY: ConditionProfile = ConditionProfile {
    low_max: 110.0,
    high_max: 210.0,
    badges: [
        "Minimal Allergic Reactive",
        "Strong Allergic Response",
        "SEVERE SYSTEMIC ALLERGY",
    ],
    description: "Particulate synergy with environmental allergens increases mucosal \
                  sensitivity, causing rhinitis and eye irritation.",
    guidance: [
        ConditionGuidance {
            dos: &["Shower after out.", "Wash face."],
            donts: &["Pet dander zones."],
        },
        ConditionGuidance {
            dos: &[
                "Change clothes often.",
                "Use HEPA filters.",
                "Keep eyes clean.",
            ],
            donts: &["Drying clothes out.", "Open window sleep."],
        },
        ConditionGuidance {
            dos: &[
                "Clinical allergy meds.",
                "Total isolation.",
                "Air filtration.",
            ],
            donts: &["Outdoor exposure.", "Skin contact with dust."],
        },
    ],
};

/// Risk band for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionRiskLevel {
    Low,
    High,
    Critical,
}

/// Personalized risk for one condition at one AQI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRisk {
    pub condition: HealthCondition,
    pub risk_level: ConditionRiskLevel,
    pub badge: &'static str,
    pub description: &'static str,
    pub guidance: ConditionGuidance,
    pub severity: AqiSeverity,
}

/// Risk for `condition` at `aqi`.
pub fn condition_risk(condition: HealthCondition, aqi: f64) -> ConditionRisk {
    let a = non_negative(aqi);
    let profile = condition.profile();
    let risk_level = if a <= profile.low_max {
        ConditionRiskLevel::Low
    } else if a <= profile.high_max {
        ConditionRiskLevel::High
    } else {
        ConditionRiskLevel::Critical
    };
    ConditionRisk {
        condition,
        risk_level,
        badge: profile.badges[risk_level as usize],
        description: profile.description,
        guidance: profile.guidance[risk_level as usize],
        severity: AqiSeverity::from_aqi(a),
    }
}
