//! Text protocol types for the headless `airwatch` engine.
//!
//! Defines the JSON command/response envelope that the dashboard (or any
//! script) uses to drive the engine over newline-delimited JSON on
//! stdin/stdout. The I/O loop lives in `crates/app/src/engine_mode.rs`.
//!
//! Numeric command fields are optional; a missing or `null` value reads as 0.

use serde::{Deserialize, Serialize};

use crate::aqi_projection::ProjectionResult;
use crate::aqi_severity::{AqiSeverity, ConditionRisk};
use crate::forecast_trend::ForecastTrend;
use crate::health_index::HealthIndexResult;
use crate::impact::ImpactAssessment;
use crate::levers::{InterventionLevels, LeverMode};
use crate::pollutants::PollutantReadings;
use crate::recommendations::{DeploymentPlan, RecommendedAction};
use crate::Extensions;

// ---------------------------------------------------------------------------
// Commands (stdin → engine)
// ---------------------------------------------------------------------------

/// A single command read from stdin. The `cmd` field is the discriminator.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum EngineCommand {
    /// Replace the baseline AQI and pollutant readings.
    #[serde(rename = "set_baseline")]
    SetBaseline {
        #[serde(default)]
        aqi: Option<f64>,
        #[serde(default)]
        pollutants: PollutantReadings,
    },

    /// Set the levers by hand (switches to manual mode).
    #[serde(rename = "set_levers")]
    SetLevers {
        #[serde(default)]
        traffic_reduction: Option<f64>,
        #[serde(default)]
        construction_control: Option<f64>,
        #[serde(default)]
        industrial_control: Option<f64>,
    },

    /// Switch between manual and auto lever selection.
    #[serde(rename = "set_mode")]
    SetMode { mode: LeverMode },

    /// Replace the monitoring counters feeding the health index.
    #[serde(rename = "set_monitoring")]
    SetMonitoring {
        #[serde(default)]
        current_aqi: Option<f64>,
        #[serde(default)]
        hotspot_count: Option<f64>,
        #[serde(default)]
        anomaly_count: Option<f64>,
    },

    /// Report the current projection and impact assessment.
    #[serde(rename = "simulate")]
    Simulate,

    /// Report the current Environmental Health Index.
    #[serde(rename = "health_index")]
    HealthIndex,

    /// Classify one pollutant reading.
    #[serde(rename = "classify")]
    Classify {
        pollutant: String,
        #[serde(default)]
        value: Option<f64>,
    },

    /// Personalized risk for a pre-existing condition at an AQI.
    #[serde(rename = "condition_risk")]
    ConditionRisk {
        condition: String,
        #[serde(default)]
        aqi: Option<f64>,
    },

    /// Direction of an AQI forecast series.
    #[serde(rename = "forecast_trend")]
    ForecastTrend {
        #[serde(default)]
        forecast: Vec<f64>,
        #[serde(default)]
        current_aqi: Option<f64>,
    },

    /// Report suggestions, the government action list and the deployment plan.
    #[serde(rename = "recommend")]
    Recommend,

    /// Serialize every saveable resource into an extension map.
    #[serde(rename = "save")]
    Save,

    /// Restore saveable resources from an extension map.
    #[serde(rename = "load")]
    Load { extensions: Extensions },

    /// Reset every saveable resource to its default.
    #[serde(rename = "reset")]
    Reset,

    /// End the session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (engine → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct EngineResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "projection")]
    Projection {
        mode: LeverMode,
        levers: InterventionLevels,
        projection: ProjectionResult,
        impact: ImpactAssessment,
    },

    #[serde(rename = "health_index")]
    HealthIndex { health_index: HealthIndexResult },

    /// `status` is a band label, or "Data Unavailable" for unknown keys.
    #[serde(rename = "classification")]
    Classification {
        pollutant: String,
        value: f64,
        status: &'static str,
    },

    #[serde(rename = "condition_risk")]
    ConditionRisk {
        risk: ConditionRisk,
        severity_label: &'static str,
        severity_level: u8,
    },

    #[serde(rename = "forecast_trend")]
    ForecastTrend { trend: ForecastTrend },

    #[serde(rename = "recommendations")]
    Recommendations {
        suggestions: Vec<String>,
        actions: Vec<RecommendedAction>,
        deployment: DeploymentPlan,
    },

    #[serde(rename = "saved")]
    Saved { extensions: Extensions },

    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

impl ResponsePayload {
    /// Condition-risk payload with the AQI severity spelled out.
    pub fn condition_risk(risk: ConditionRisk) -> Self {
        let severity: AqiSeverity = risk.severity;
        ResponsePayload::ConditionRisk {
            severity_label: severity.label(),
            severity_level: severity.level(),
            risk,
        }
    }
}

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> EngineResponse {
    EngineResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}
