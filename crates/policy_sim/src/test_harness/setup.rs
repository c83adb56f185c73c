//! Builder methods for scenario, monitoring and parameter setup.

use crate::engine_params::EngineParams;
use crate::levers::{InterventionLevels, LeverMode};
use crate::monitoring::MonitoringSnapshot;
use crate::pollutants::{Pollutant, PollutantReadings};
use crate::scenario::ScenarioInputs;

use super::TestScenario;

impl TestScenario {
    /// Set the baseline AQI and the three projected pollutants.
    pub fn with_baseline(self, aqi: f64, pm25: f64, pm10: f64, no2: f64) -> Self {
        self.with_readings(aqi, PollutantReadings::from_core(pm25, pm10, no2))
    }

    /// Set the baseline AQI and an arbitrary set of readings.
    pub fn with_readings(mut self, aqi: f64, readings: PollutantReadings) -> Self {
        self.inputs_mut().set_baseline(aqi, readings);
        self
    }

    /// Add one pollutant to the existing baseline.
    pub fn with_pollutant(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.inputs_mut().baseline.set(pollutant, value);
        self
    }

    /// Set the levers by hand (manual mode).
    pub fn with_levers(mut self, traffic: f64, construction: f64, industrial: f64) -> Self {
        self.inputs_mut()
            .set_levers(InterventionLevels::new(traffic, construction, industrial));
        self
    }

    /// Write the levers without clamping, to exercise input normalization.
    pub fn with_raw_levers(mut self, levers: InterventionLevels) -> Self {
        let mut inputs = self.inputs_mut();
        inputs.levers = levers;
        inputs.mode = LeverMode::Manual;
        self
    }

    pub fn with_mode(mut self, mode: LeverMode) -> Self {
        let params = self.app.world().resource::<EngineParams>().clone();
        self.inputs_mut().set_mode(mode, &params);
        self
    }

    pub fn with_monitoring(mut self, current_aqi: f64, hotspots: f64, anomalies: f64) -> Self {
        self.app
            .world_mut()
            .insert_resource(MonitoringSnapshot::new(current_aqi, hotspots, anomalies));
        self
    }

    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.app.world_mut().insert_resource(params);
        self
    }

    fn inputs_mut(&mut self) -> bevy::prelude::Mut<'_, ScenarioInputs> {
        self.app.world_mut().resource_mut::<ScenarioInputs>()
    }
}
