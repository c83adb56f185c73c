//! Engine mode: a headless JSON-lines session for dashboards and scripts.
//!
//! Reads [`EngineCommand`]s from the input (one per line) and writes
//! [`EngineResponse`]s to the output (one per line). Every command that
//! changes state runs one `app.update()` so the projection, health index and
//! recommendations are current before the next command is read.

use std::io::{self, BufRead, Write};

use bevy::prelude::*;

use policy_sim::aqi_severity::{condition_risk, HealthCondition};
use policy_sim::engine_params::EngineParams;
use policy_sim::forecast_trend::forecast_trend;
use policy_sim::levers::InterventionLevels;
use policy_sim::monitoring::{HealthIndexState, MonitoringSnapshot};
use policy_sim::pollutants::status_for_key;
use policy_sim::protocol::{make_response, EngineCommand, EngineResponse, ResponsePayload};
use policy_sim::scenario::{ScenarioInputs, ScenarioOutputs, ScenarioRecommendations};
use policy_sim::{load_world, reset_world, save_world, PolicySimPlugin};

/// Add the engine plugins to an app that already has its base plugins.
pub fn install(app: &mut App) {
    app.add_plugins(PolicySimPlugin);
}

/// Run a session until `quit` or end of input.
///
/// Lines that fail to parse get an `error` response; the session continues.
pub fn run_session(app: &mut App, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    app.update();
    write_response(&mut output, &make_response(ResponsePayload::Ready))?;
    info!("Engine ready, awaiting commands");

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<EngineCommand>(line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => {
                warn!("Rejected command: {e}");
                make_response(ResponsePayload::Error {
                    message: format!("parse error: {e}"),
                })
            }
        };

        write_response(&mut output, &response)?;

        if matches!(response.payload, ResponsePayload::Goodbye) {
            break;
        }
    }

    info!("Engine session ended");
    Ok(())
}

fn write_response(output: &mut impl Write, response: &EngineResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()
}

/// Apply one command to the app and build its response.
pub fn process_command(cmd: EngineCommand, app: &mut App) -> EngineResponse {
    let payload = match cmd {
        EngineCommand::SetBaseline { aqi, pollutants } => {
            app.world_mut()
                .resource_mut::<ScenarioInputs>()
                .set_baseline(aqi.unwrap_or(0.0), pollutants);
            app.update();
            ResponsePayload::Ok
        }
        EngineCommand::SetLevers {
            traffic_reduction,
            construction_control,
            industrial_control,
        } => {
            let levers = InterventionLevels::new(
                traffic_reduction.unwrap_or(0.0),
                construction_control.unwrap_or(0.0),
                industrial_control.unwrap_or(0.0),
            );
            app.world_mut()
                .resource_mut::<ScenarioInputs>()
                .set_levers(levers);
            app.update();
            ResponsePayload::Ok
        }
        EngineCommand::SetMode { mode } => {
            let params = app.world().resource::<EngineParams>().clone();
            app.world_mut()
                .resource_mut::<ScenarioInputs>()
                .set_mode(mode, &params);
            app.update();
            ResponsePayload::Ok
        }
        EngineCommand::SetMonitoring {
            current_aqi,
            hotspot_count,
            anomaly_count,
        } => {
            *app.world_mut().resource_mut::<MonitoringSnapshot>() = MonitoringSnapshot::new(
                current_aqi.unwrap_or(0.0),
                hotspot_count.unwrap_or(0.0),
                anomaly_count.unwrap_or(0.0),
            );
            app.update();
            ResponsePayload::Ok
        }
        EngineCommand::Simulate => {
            let world = app.world();
            let inputs = world.resource::<ScenarioInputs>();
            let outputs = world.resource::<ScenarioOutputs>();
            ResponsePayload::Projection {
                mode: inputs.mode,
                levers: inputs.levers,
                projection: outputs.projection.clone(),
                impact: outputs.impact.clone(),
            }
        }
        EngineCommand::HealthIndex => ResponsePayload::HealthIndex {
            health_index: app.world().resource::<HealthIndexState>().index.clone(),
        },
        EngineCommand::Classify { pollutant, value } => {
            let value = value.unwrap_or(0.0);
            ResponsePayload::Classification {
                status: status_for_key(&pollutant, value),
                pollutant,
                value,
            }
        }
        EngineCommand::ConditionRisk { condition, aqi } => ResponsePayload::condition_risk(
            condition_risk(HealthCondition::from_name(&condition), aqi.unwrap_or(0.0)),
        ),
        EngineCommand::ForecastTrend {
            forecast,
            current_aqi,
        } => ResponsePayload::ForecastTrend {
            trend: forecast_trend(&forecast, current_aqi.unwrap_or(0.0)),
        },
        EngineCommand::Recommend => {
            let recommendations = app.world().resource::<ScenarioRecommendations>();
            ResponsePayload::Recommendations {
                suggestions: recommendations.suggestions.clone(),
                actions: recommendations.actions.clone(),
                deployment: recommendations.deployment,
            }
        }
        EngineCommand::Save => {
            let extensions = save_world(app.world());
            info!("Saved {} resources", extensions.len());
            ResponsePayload::Saved { extensions }
        }
        EngineCommand::Load { extensions } => {
            load_world(app.world_mut(), &extensions);
            app.update();
            info!("Loaded {} resources", extensions.len());
            ResponsePayload::Ok
        }
        EngineCommand::Reset => {
            reset_world(app.world_mut());
            app.update();
            info!("Engine state reset");
            ResponsePayload::Ok
        }
        EngineCommand::Quit => ResponsePayload::Goodbye,
    };
    make_response(payload)
}
