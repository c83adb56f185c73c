use bevy::prelude::*;

pub mod aqi_projection;
pub mod aqi_severity;
pub mod engine_params;
pub mod forecast_trend;
pub mod health_index;
pub mod impact;
pub mod levers;
pub mod monitoring;
pub mod numeric;
pub mod persistence;
pub mod policy_sets;
pub mod pollutant_projection;
pub mod pollutants;
pub mod protocol;
pub mod recommendations;
pub mod scenario;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use persistence::{
    decode_or_warn, load_world, reset_world, save_world, Extensions, Saveable, SaveableRegistry,
};
pub use policy_sets::PolicySimSet;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Engine parameters, scenario projection and health index, ordered by
/// [`PolicySimSet`].
pub struct PolicySimPlugin;

impl Plugin for PolicySimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveableRegistry>();

        app.configure_sets(
            Update,
            (
                PolicySimSet::Inputs,
                PolicySimSet::Projection,
                PolicySimSet::Assessment,
            )
                .chain(),
        );

        app.add_plugins((
            engine_params::EngineParamsPlugin,
            monitoring::HealthIndexPlugin,
            scenario::ScenarioPlugin,
        ));
    }
}
