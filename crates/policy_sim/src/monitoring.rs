//! Live monitoring counters and the Environmental Health Index derived from
//! them.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::engine_params::EngineParams;
use crate::health_index::{compute_health_index_with, HealthIndexResult};
use crate::numeric::non_negative;
use crate::{decode_or_warn, PolicySimSet, Saveable};

/// Counters reported by the monitoring network.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MonitoringSnapshot {
    #[serde(default)]
    pub current_aqi: f64,
    #[serde(default)]
    pub hotspot_count: f64,
    #[serde(default)]
    pub anomaly_count: f64,
}

impl MonitoringSnapshot {
    pub fn new(current_aqi: f64, hotspot_count: f64, anomaly_count: f64) -> Self {
        Self {
            current_aqi,
            hotspot_count,
            anomaly_count,
        }
    }

    fn sanitized(&self) -> Self {
        Self::new(
            non_negative(self.current_aqi),
            non_negative(self.hotspot_count),
            non_negative(self.anomaly_count),
        )
    }
}

impl Saveable for MonitoringSnapshot {
    const SAVE_KEY: &'static str = "monitoring_snapshot";

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

/// Latest health index for [`MonitoringSnapshot`].
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthIndexState {
    pub index: HealthIndexResult,
}

pub fn normalize_monitoring_snapshot(mut snapshot: ResMut<MonitoringSnapshot>) {
    let clean = snapshot.sanitized();
    if clean != *snapshot {
        warn!(
            "Monitoring snapshot has invalid counters (aqi {}, hotspots {}, anomalies {}), coerced to 0",
            snapshot.current_aqi, snapshot.hotspot_count, snapshot.anomaly_count,
        );
        *snapshot = clean;
    }
}

pub fn update_health_index(
    snapshot: Res<MonitoringSnapshot>,
    params: Res<EngineParams>,
    mut state: ResMut<HealthIndexState>,
) {
    let index = compute_health_index_with(
        &params.health_index_params(),
        snapshot.current_aqi,
        snapshot.hotspot_count,
        snapshot.anomaly_count,
    );

    debug!(
        "Health index recomputed: {} ({})",
        index.overall_score,
        index.status.label()
    );
    if index.status != state.index.status {
        info!(
            "Environmental health status changed: {} -> {}",
            state.index.status.label(),
            index.status.label(),
        );
    }

    state.index = index;
}

fn snapshot_or_params_changed(snapshot: Res<MonitoringSnapshot>, params: Res<EngineParams>) -> bool {
    snapshot.is_changed() || params.is_changed()
}

pub struct HealthIndexPlugin;

impl Plugin for HealthIndexPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MonitoringSnapshot>()
            .init_resource::<HealthIndexState>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<MonitoringSnapshot>();

        app.add_systems(
            Update,
            (
                normalize_monitoring_snapshot
                    .run_if(resource_changed::<MonitoringSnapshot>)
                    .in_set(PolicySimSet::Inputs),
                update_health_index
                    .run_if(snapshot_or_params_changed)
                    .in_set(PolicySimSet::Assessment),
            ),
        );
    }
}
