//! Data-driven engine parameters.
//!
//! Collects the tunables of the projection and health-index models into a
//! single [`EngineParams`] resource. It is registered via the `Saveable`
//! trait so overrides persist across save/load cycles, and can be loaded from
//! a JSON document at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aqi_projection::AqiModel;
use crate::health_index::{
    HealthIndexParams, DEFAULT_ANOMALY_CAP_PERCENT, DEFAULT_ANOMALY_WINDOW, DEFAULT_TOTAL_STATIONS,
};
use crate::levers::InterventionLevels;

/// Central resource holding every engine tunable.
///
/// Missing JSON fields take their default, so a params file only needs the
/// overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct EngineParams {
    /// AQI projection formula applied to every scenario.
    pub aqi_model: AqiModel,
    /// Reference station count for hotspot density.
    pub total_stations: f64,
    /// Observation windows considered for anomaly density.
    pub anomaly_window: f64,
    /// Ceiling on anomaly density, in percent.
    pub anomaly_cap_percent: f64,
    /// Levers restored when switching from auto back to manual mode.
    pub manual_levers: InterventionLevels,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            aqi_model: AqiModel::Weighted,
            total_stations: DEFAULT_TOTAL_STATIONS,
            anomaly_window: DEFAULT_ANOMALY_WINDOW,
            anomaly_cap_percent: DEFAULT_ANOMALY_CAP_PERCENT,
            manual_levers: InterventionLevels::default(),
        }
    }
}

impl EngineParams {
    /// Parse a (possibly partial) JSON params document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut params: Self = serde_json::from_str(json)?;
        params.manual_levers = params.manual_levers.sanitized();
        Ok(params)
    }

    pub fn health_index_params(&self) -> HealthIndexParams {
        HealthIndexParams {
            total_stations: self.total_stations,
            anomaly_window: self.anomaly_window,
            anomaly_cap_percent: self.anomaly_cap_percent,
        }
    }
}

// ---------------------------------------------------------------------------
// Saveable implementation
// ---------------------------------------------------------------------------

impl crate::Saveable for EngineParams {
    const SAVE_KEY: &'static str = "engine_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Always save so a scenario evaluated under custom params restores
        // under the same params.
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct EngineParamsPlugin;

impl Plugin for EngineParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineParams>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<EngineParams>();
    }
}
