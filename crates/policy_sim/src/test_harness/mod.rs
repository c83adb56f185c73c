//! # TestScenario: headless integration test harness for the policy engine
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `PolicySimPlugin`
//! for running integration tests without a window or renderer.

mod assertions;
mod queries;
mod setup;

use bevy::prelude::*;

use crate::PolicySimPlugin;

/// A headless Bevy App wrapping `PolicySimPlugin` for integration testing.
///
/// Use builder methods to set scenario and monitoring inputs, then call
/// `update()` to let the systems recompute and query the resulting resources.
pub struct TestScenario {
    app: App,
}

impl TestScenario {
    /// Create an engine with every resource at its default, after one update.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(PolicySimPlugin);
        app.update();
        Self { app }
    }

    /// The reference scenario: AQI 250, PM2.5 150, PM10 200, NO2 80, all
    /// levers at 50%.
    pub fn reference() -> Self {
        let mut scenario = Self::new()
            .with_baseline(250.0, 150.0, 200.0, 80.0)
            .with_levers(50.0, 50.0, 50.0);
        scenario.update();
        scenario
    }
}

impl Default for TestScenario {
    fn default() -> Self {
        Self::new()
    }
}
