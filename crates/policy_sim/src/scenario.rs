//! Scenario state and the systems that keep its projection current.
//!
//! [`ScenarioInputs`] is the only thing callers write. Whenever it (or
//! [`EngineParams`]) changes, the projection and impact assessment in
//! [`ScenarioOutputs`] are recomputed within the same frame.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::aqi_projection::{simulate, ProjectionResult};
use crate::engine_params::EngineParams;
use crate::impact::{assess_impact, ImpactAssessment};
use crate::levers::{auto_preset, InterventionLevels, LeverMode};
use crate::monitoring::MonitoringSnapshot;
use crate::numeric::non_negative;
use crate::pollutants::PollutantReadings;
use crate::recommendations::{
    deployment_plan, pollutant_suggestions, recommended_actions, DeploymentPlan, RecommendedAction,
};
use crate::{decode_or_warn, PolicySimSet, Saveable};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Baseline conditions and the intervention scenario applied to them.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ScenarioInputs {
    /// Observed composite AQI before any intervention.
    pub baseline_aqi: f64,
    pub baseline: PollutantReadings,
    /// Levers in effect. In auto mode these track the preset for `baseline`.
    pub levers: InterventionLevels,
    pub mode: LeverMode,
}

impl ScenarioInputs {
    /// Replace the baseline. In auto mode the levers follow the new preset.
    pub fn set_baseline(&mut self, baseline_aqi: f64, baseline: PollutantReadings) {
        self.baseline_aqi = baseline_aqi;
        self.baseline = baseline;
        if self.mode == LeverMode::Auto {
            self.levers = auto_preset(&self.baseline);
        }
    }

    /// Set the levers by hand. Leaves auto mode.
    pub fn set_levers(&mut self, levers: InterventionLevels) {
        self.levers = levers;
        self.mode = LeverMode::Manual;
    }

    /// Switch lever mode. Entering auto applies the preset for the current
    /// baseline; returning to manual restores `params.manual_levers`.
    pub fn set_mode(&mut self, mode: LeverMode, params: &EngineParams) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.levers = match mode {
            LeverMode::Auto => auto_preset(&self.baseline),
            LeverMode::Manual => params.manual_levers,
        };
    }
}

impl Saveable for ScenarioInputs {
    const SAVE_KEY: &'static str = "scenario_inputs";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Latest projection and impact for [`ScenarioInputs`].
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioOutputs {
    pub projection: ProjectionResult,
    pub impact: ImpactAssessment,
    /// Number of times the projection has been recomputed.
    pub evaluations: u64,
}

/// Suggestions for the baseline readings, the government action list and
/// the field deployment for the monitoring counters.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioRecommendations {
    pub suggestions: Vec<String>,
    pub actions: Vec<RecommendedAction>,
    pub deployment: DeploymentPlan,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Coerce malformed baseline AQI and out-of-range levers, logging each fix.
/// Also re-applies the auto preset. Writes only when a value differs.
pub fn normalize_scenario_inputs(mut inputs: ResMut<ScenarioInputs>) {
    let aqi = inputs.baseline_aqi;
    if non_negative(aqi) != aqi {
        warn!("Scenario baseline AQI {} is invalid, using 0", aqi);
        inputs.baseline_aqi = non_negative(aqi);
    }
    if inputs.levers.needs_sanitizing() {
        let raw = inputs.levers;
        inputs.levers = raw.sanitized();
        warn!(
            "Scenario levers out of range ({}, {}, {}), clamped to ({}, {}, {})",
            raw.traffic_reduction,
            raw.construction_control,
            raw.industrial_control,
            inputs.levers.traffic_reduction,
            inputs.levers.construction_control,
            inputs.levers.industrial_control,
        );
    }
    if inputs.mode == LeverMode::Auto {
        let preset = auto_preset(&inputs.baseline);
        if inputs.levers != preset {
            inputs.levers = preset;
        }
    }
}

/// Recompute projection and impact from the current inputs.
pub fn update_scenario_outputs(
    inputs: Res<ScenarioInputs>,
    params: Res<EngineParams>,
    mut outputs: ResMut<ScenarioOutputs>,
) {
    let projection = simulate(
        inputs.baseline_aqi,
        &inputs.baseline,
        &inputs.levers,
        params.aqi_model,
    );
    let impact = assess_impact(
        projection.baseline_aqi,
        projection.projected_aqi,
        inputs.baseline.pm25(),
    );

    debug!(
        "Scenario evaluated: AQI {} -> {} ({}%), {:?} model",
        projection.baseline_aqi,
        projection.projected_aqi,
        projection.improvement_percent,
        params.aqi_model,
    );

    let previous_level = outputs.impact.risk_level;
    if outputs.evaluations > 0 && impact.risk_level != previous_level {
        info!(
            "Economic risk level changed: {} -> {} (score {})",
            previous_level.label(),
            impact.risk_level.label(),
            impact.risk_score,
        );
    }

    outputs.projection = projection;
    outputs.impact = impact;
    outputs.evaluations += 1;
}

/// Rebuild suggestions and actions. Actions are keyed on the live AQI when
/// monitoring has reported one, otherwise on the scenario baseline.
pub fn update_recommendations(
    inputs: Res<ScenarioInputs>,
    outputs: Res<ScenarioOutputs>,
    snapshot: Res<MonitoringSnapshot>,
    mut recommendations: ResMut<ScenarioRecommendations>,
) {
    let current_aqi = if snapshot.current_aqi > 0.0 {
        snapshot.current_aqi
    } else {
        outputs.projection.baseline_aqi
    };

    recommendations.suggestions = pollutant_suggestions(&inputs.baseline);
    recommendations.actions = recommended_actions(
        current_aqi,
        outputs.impact.risk_level,
        snapshot.hotspot_count,
        snapshot.anomaly_count,
    );
    recommendations.deployment = deployment_plan(
        snapshot.hotspot_count,
        snapshot.anomaly_count,
        outputs.impact.risk_level,
    );
    debug!(
        "Recommendations rebuilt: {} suggestions, {} actions, {} units ({})",
        recommendations.suggestions.len(),
        recommendations.actions.len(),
        recommendations.deployment.total_deployment,
        recommendations.deployment.intensity.label(),
    );
}

// ---------------------------------------------------------------------------
// Run conditions
// ---------------------------------------------------------------------------

// Both resources are read on every run so neither change tick goes stale.

fn scenario_or_params_changed(inputs: Res<ScenarioInputs>, params: Res<EngineParams>) -> bool {
    inputs.is_changed() || params.is_changed()
}

fn outputs_or_monitoring_changed(
    outputs: Res<ScenarioOutputs>,
    snapshot: Res<MonitoringSnapshot>,
) -> bool {
    outputs.is_changed() || snapshot.is_changed()
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScenarioInputs>()
            .init_resource::<ScenarioOutputs>()
            .init_resource::<ScenarioRecommendations>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<ScenarioInputs>();

        app.add_systems(
            Update,
            (
                normalize_scenario_inputs
                    .run_if(resource_changed::<ScenarioInputs>)
                    .in_set(PolicySimSet::Inputs),
                update_scenario_outputs
                    .run_if(scenario_or_params_changed)
                    .in_set(PolicySimSet::Projection),
                update_recommendations
                    .run_if(outputs_or_monitoring_changed)
                    .in_set(PolicySimSet::Assessment),
            ),
        );
    }
}
