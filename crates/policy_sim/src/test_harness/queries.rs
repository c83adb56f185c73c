//! Query and update methods for `TestScenario`.

use bevy::prelude::*;

use crate::aqi_projection::ProjectionResult;
use crate::health_index::HealthIndexResult;
use crate::impact::ImpactAssessment;
use crate::monitoring::HealthIndexState;
use crate::scenario::{ScenarioInputs, ScenarioOutputs, ScenarioRecommendations};

use super::TestScenario;

impl TestScenario {
    // -----------------------------------------------------------------------
    // Schedule
    // -----------------------------------------------------------------------

    /// Run one full app update (all `Update` systems).
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run `n` app updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn inputs(&self) -> &ScenarioInputs {
        self.resource::<ScenarioInputs>()
    }

    pub fn outputs(&self) -> &ScenarioOutputs {
        self.resource::<ScenarioOutputs>()
    }

    pub fn projection(&self) -> &ProjectionResult {
        &self.outputs().projection
    }

    pub fn impact(&self) -> &ImpactAssessment {
        &self.outputs().impact
    }

    pub fn health_index(&self) -> &HealthIndexResult {
        &self.resource::<HealthIndexState>().index
    }

    pub fn recommendations(&self) -> &ScenarioRecommendations {
        self.resource::<ScenarioRecommendations>()
    }

    /// How many times the projection system has run.
    pub fn evaluations(&self) -> u64 {
        self.outputs().evaluations
    }
}
