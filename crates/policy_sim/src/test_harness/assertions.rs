//! Assertion helpers for `TestScenario` integration tests.

use bevy::prelude::*;

use crate::health_index::HealthStatus;
use crate::impact::RiskLevel;

use super::TestScenario;

impl TestScenario {
    pub fn assert_projected_aqi(&self, expected: f64) {
        let actual = self.projection().projected_aqi;
        assert_eq!(actual, expected, "Expected projected AQI {expected}, got {actual}");
    }

    pub fn assert_risk_level(&self, expected: RiskLevel) {
        let actual = self.impact().risk_level;
        assert_eq!(actual, expected, "Expected risk level {expected:?}, got {actual:?}");
    }

    pub fn assert_health_status(&self, expected: HealthStatus) {
        let actual = self.health_index().status;
        assert_eq!(actual, expected, "Expected health status {expected:?}, got {actual:?}");
    }

    /// Assert every score and percentage in the outputs lies in [0, 100].
    pub fn assert_outputs_bounded(&self) {
        let impact = self.impact();
        let index = self.health_index();
        for (name, value) in [
            ("productivity_loss_percent", impact.productivity_loss_percent),
            ("healthcare_burden_percent", impact.healthcare_burden_percent),
            ("risk_score", impact.risk_score),
            ("aqi_impact_score", index.aqi_impact_score),
            ("hotspot_score", index.hotspot_score),
            ("anomaly_score", index.anomaly_score),
            ("overall_score", index.overall_score),
        ] {
            assert!(
                value.is_finite() && (0.0..=100.0).contains(&value),
                "{name} out of bounds: {value}"
            );
        }
        let projected = self.projection().projected_aqi;
        assert!(
            projected.is_finite() && projected >= 0.0,
            "projected AQI invalid: {projected}"
        );
    }

    /// Assert a resource has been initialized (exists in the world).
    pub fn assert_resource_exists<T: Resource>(&self) {
        assert!(
            self.world().get_resource::<T>().is_some(),
            "Expected resource {} to exist",
            std::any::type_name::<T>()
        );
    }
}
