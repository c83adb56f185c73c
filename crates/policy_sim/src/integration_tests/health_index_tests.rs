//! Environmental Health Index recomputation through the ECS layer.

use crate::engine_params::EngineParams;
use crate::health_index::HealthStatus;
use crate::monitoring::MonitoringSnapshot;
use crate::test_harness::TestScenario;

#[test]
fn test_pristine_monitoring_is_excellent() {
    let mut scenario = TestScenario::new().with_monitoring(0.0, 0.0, 0.0);
    scenario.update();
    assert_eq!(scenario.health_index().overall_score, 100.0);
    scenario.assert_health_status(HealthStatus::Excellent);
}

#[test]
fn test_saturated_monitoring_is_critical() {
    let mut scenario = TestScenario::new().with_monitoring(500.0, 40.0, 24.0);
    scenario.update();
    let index = scenario.health_index();
    assert_eq!(index.anomaly_density_percent, 75.0);
    assert_eq!(index.anomaly_score, 25.0);
    assert_eq!(index.overall_score, 8.0);
    scenario.assert_health_status(HealthStatus::Critical);
}

#[test]
fn test_station_param_changes_hotspot_density() {
    let mut scenario = TestScenario::new()
        .with_monitoring(0.0, 10.0, 0.0)
        .with_params(EngineParams {
            total_stations: 20.0,
            ..Default::default()
        });
    scenario.update();
    assert_eq!(scenario.health_index().hotspot_density_percent, 50.0);
    assert_eq!(scenario.health_index().overall_score, 85.0);
}

#[test]
fn test_invalid_counters_are_coerced() {
    let mut scenario = TestScenario::new().with_monitoring(f64::INFINITY, -4.0, f64::NAN);
    scenario.update();
    assert_eq!(
        *scenario.resource::<MonitoringSnapshot>(),
        MonitoringSnapshot::new(0.0, 0.0, 0.0)
    );
    scenario.assert_health_status(HealthStatus::Excellent);
    scenario.assert_outputs_bounded();
}

#[test]
fn test_index_independent_of_scenario() {
    let mut scenario = TestScenario::reference().with_monitoring(150.0, 8.0, 6.0);
    scenario.update();
    let before = scenario.health_index().clone();

    let mut scenario = scenario.with_levers(90.0, 90.0, 90.0);
    scenario.update();
    assert_eq!(*scenario.health_index(), before);
}
