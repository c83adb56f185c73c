//! Pollutant-driven suggestions, the government action list and the
//! resource deployment plan.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::impact::RiskLevel;
use crate::numeric::non_negative;
use crate::pollutants::{Pollutant, PollutantReadings};

// ---------------------------------------------------------------------------
// Pollutant suggestions
// ---------------------------------------------------------------------------

/// Threshold rule: when the reading exceeds `above`, push `actions`.
/// Rules for one pollutant are checked in order and only the first match
/// applies.
struct SuggestionRule {
    above: f64,
    actions: &'static [&'static str],
}

const PM25_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        above: 90.0,
        actions: &[
            "Increase dust suppression vehicles",
            "Restrict construction temporarily",
            "Issue public health advisory",
        ],
    },
    SuggestionRule {
        above: 60.0,
        actions: &["Enforce dust control measures", "Promote use of air purifiers"],
    },
];

const PM10_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        above: 100.0,
        actions: &["Enforce construction compliance", "Deploy mobile air filters"],
    },
    SuggestionRule {
        above: 50.0,
        actions: &["Monitor construction sites closely"],
    },
];

const NO2_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        above: 80.0,
        actions: &["Traffic restriction in affected zones", "Industrial emission audit"],
    },
    SuggestionRule {
        above: 40.0,
        actions: &["Increase traffic monitoring"],
    },
];

const SO2_RULES: &[SuggestionRule] = &[SuggestionRule {
    above: 80.0,
    actions: &[
        "Inspect industrial emission sources",
        "Increase emissions monitoring frequency",
    ],
}];

const CO_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        above: 10.0,
        actions: &["Vehicle emission checks", "Promote public transport usage"],
    },
    SuggestionRule {
        above: 4.0,
        actions: &["Encourage vehicle maintenance programs"],
    },
];

fn push_first_match(out: &mut Vec<String>, value: f64, rules: &[SuggestionRule]) {
    if let Some(rule) = rules.iter().find(|r| value > r.above) {
        out.extend(rule.actions.iter().map(|s| (*s).to_string()));
    }
}

/// Suggestions for the given readings, ordered pm25, pm10, no2, so2, co.
/// Ozone produces no suggestions.
pub fn pollutant_suggestions(readings: &PollutantReadings) -> Vec<String> {
    let mut out = Vec::new();
    push_first_match(&mut out, readings.pm25(), PM25_RULES);
    push_first_match(&mut out, readings.pm10(), PM10_RULES);
    push_first_match(&mut out, readings.no2(), NO2_RULES);
    push_first_match(&mut out, readings.get(Pollutant::So2), SO2_RULES);
    push_first_match(&mut out, readings.get(Pollutant::Co), CO_RULES);
    out
}

/// Append every non-empty entry of `extra` not already present.
/// `existing` is kept as given.
pub fn merge_suggestions(existing: &[String], extra: &[String]) -> Vec<String> {
    let mut merged = existing.to_vec();
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    for suggestion in extra {
        if !suggestion.is_empty() && seen.insert(suggestion.as_str()) {
            merged.push(suggestion.clone());
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Government actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    Critical,
    High,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
}

impl RecommendedAction {
    fn new(
        id: &str,
        title: &str,
        description: impl Into<String>,
        priority: ActionPriority,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.into(),
            priority,
        }
    }
}

const HOTSPOT_ACTION_THRESHOLD: f64 = 5.0;
const ANOMALY_ACTION_THRESHOLD: f64 = 5.0;
const INSPECTION_TEAMS_PER_HOTSPOT: f64 = 0.8;
const DUST_VEHICLES_PER_ANOMALY: f64 = 1.2;
const HEALTH_UNITS_EXTREME: u32 = 40;
const HEALTH_UNITS_HIGH: u32 = 20;

/// Build the action list for the current situation.
///
/// Actions are emitted in a fixed order; when none apply a single
/// "Continue Monitoring" entry is returned.
pub fn recommended_actions(
    current_aqi: f64,
    risk_level: RiskLevel,
    hotspot_count: f64,
    anomaly_count: f64,
) -> Vec<RecommendedAction> {
    let aqi = non_negative(current_aqi);
    let hotspots = non_negative(hotspot_count);
    let anomalies = non_negative(anomaly_count);
    let mut actions = Vec::new();

    if aqi > 200.0 || risk_level == RiskLevel::Extreme {
        actions.push(RecommendedAction::new(
            "traffic",
            "Restrict Vehicle Traffic",
            "Implement odd-even scheme or temporary closures on major routes",
            ActionPriority::Critical,
        ));
    }

    if hotspots > HOTSPOT_ACTION_THRESHOLD {
        let teams = (hotspots * INSPECTION_TEAMS_PER_HOTSPOT).ceil();
        actions.push(RecommendedAction::new(
            "inspections",
            "Increase Inspections",
            format!("Deploy {teams} inspection teams to high-severity zones"),
            if aqi > 150.0 {
                ActionPriority::Critical
            } else {
                ActionPriority::High
            },
        ));
    }

    if matches!(risk_level, RiskLevel::Extreme | RiskLevel::High) {
        let units = if risk_level == RiskLevel::Extreme {
            HEALTH_UNITS_EXTREME
        } else {
            HEALTH_UNITS_HIGH
        };
        actions.push(RecommendedAction::new(
            "health",
            "Deploy Mobile Health Units",
            format!("Activate {units} mobile medical response units"),
            ActionPriority::Critical,
        ));
    }

    if anomalies > ANOMALY_ACTION_THRESHOLD {
        let vehicles = (anomalies * DUST_VEHICLES_PER_ANOMALY).ceil();
        actions.push(RecommendedAction::new(
            "vehicles",
            "Deploy Dust Control Vehicles",
            format!("Position {vehicles} anti-pollution equipment at hotspots"),
            ActionPriority::High,
        ));
    }

    if aqi > 250.0 {
        actions.push(RecommendedAction::new(
            "construction",
            "Halt Construction Activities",
            "Suspend all high-dust construction and demolition projects immediately",
            ActionPriority::Critical,
        ));
    }

    if aqi > 150.0 {
        actions.push(RecommendedAction::new(
            "industry",
            "Industrial Restrictions",
            "Reduce industrial operations; encourage work-from-home policies",
            ActionPriority::High,
        ));
    }

    if actions.is_empty() {
        actions.push(RecommendedAction::new(
            "monitor",
            "Continue Monitoring",
            "Environmental conditions are stable. Maintain regular monitoring protocols.",
            ActionPriority::Info,
        ));
    }

    actions
}

// ---------------------------------------------------------------------------
// Resource deployment
// ---------------------------------------------------------------------------

const HEALTH_UNITS_PER_RISK_STEP: u64 = 10;

/// Overall size of a deployment, banded on its total unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentIntensity {
    Low,
    Moderate,
    High,
    Critical,
}

impl DeploymentIntensity {
    /// ≤10 Low, ≤25 Moderate, ≤50 High, else Critical.
    pub fn from_total(total: u64) -> Self {
        match total {
            0..=10 => DeploymentIntensity::Low,
            11..=25 => DeploymentIntensity::Moderate,
            26..=50 => DeploymentIntensity::High,
            _ => DeploymentIntensity::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeploymentIntensity::Low => "Low",
            DeploymentIntensity::Moderate => "Moderate",
            DeploymentIntensity::High => "High",
            DeploymentIntensity::Critical => "Critical",
        }
    }
}

/// Field units to dispatch for the current monitoring counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// At least one team.
    pub inspection_teams: u64,
    /// At least one vehicle.
    pub dust_vehicles: u64,
    pub mobile_health_units: u64,
    /// 1 (Low) to 4 (Extreme).
    pub risk_multiplier: u64,
    /// Sum of the unfloored team and vehicle counts plus health units, so a
    /// quiet city can total fewer units than the plan lists.
    pub total_deployment: u64,
    pub intensity: DeploymentIntensity,
}

impl Default for DeploymentPlan {
    fn default() -> Self {
        deployment_plan(0.0, 0.0, RiskLevel::Low)
    }
}

fn risk_multiplier(risk_level: RiskLevel) -> u64 {
    match risk_level {
        RiskLevel::Low => 1,
        RiskLevel::Moderate => 2,
        RiskLevel::High => 3,
        RiskLevel::Extreme => 4,
    }
}

/// Size the inspection, dust-control and mobile-health deployment.
pub fn deployment_plan(hotspot_count: f64, anomaly_count: f64, risk_level: RiskLevel) -> DeploymentPlan {
    let teams = (non_negative(hotspot_count) * INSPECTION_TEAMS_PER_HOTSPOT).ceil() as u64;
    let vehicles = (non_negative(anomaly_count) * DUST_VEHICLES_PER_ANOMALY).ceil() as u64;
    let multiplier = risk_multiplier(risk_level);
    let health_units = multiplier * HEALTH_UNITS_PER_RISK_STEP;
    let total = teams.saturating_add(vehicles).saturating_add(health_units);

    DeploymentPlan {
        inspection_teams: teams.max(1),
        dust_vehicles: vehicles.max(1),
        mobile_health_units: health_units.max(1),
        risk_multiplier: multiplier,
        total_deployment: total,
        intensity: DeploymentIntensity::from_total(total),
    }
}
