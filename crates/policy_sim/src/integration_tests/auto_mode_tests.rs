//! Auto-mode lever presets driven through the ECS layer.

use crate::engine_params::EngineParams;
use crate::levers::{
    InterventionLevels, LeverMode, INDUSTRIAL_PRESET, PM10_DOMINANT_PRESET, PM25_DOMINANT_PRESET,
};
use crate::test_harness::TestScenario;

#[test]
fn test_auto_mode_picks_pm10_preset_for_reference() {
    let mut scenario = TestScenario::reference().with_mode(LeverMode::Auto);
    scenario.update();
    assert_eq!(scenario.inputs().mode, LeverMode::Auto);
    assert_eq!(scenario.inputs().levers, PM10_DOMINANT_PRESET);
}

#[test]
fn test_auto_mode_follows_new_baseline() {
    let mut scenario = TestScenario::new()
        .with_mode(LeverMode::Auto)
        .with_baseline(200.0, 160.0, 90.0, 50.0);
    scenario.update();
    assert_eq!(scenario.inputs().levers, PM25_DOMINANT_PRESET);

    let mut scenario = scenario.with_baseline(200.0, 50.0, 50.0, 90.0);
    scenario.update();
    assert_eq!(scenario.inputs().levers, INDUSTRIAL_PRESET);
}

#[test]
fn test_manual_mode_restores_configured_levers() {
    let manual = InterventionLevels::new(5.0, 10.0, 15.0);
    let mut scenario = TestScenario::reference()
        .with_params(EngineParams {
            manual_levers: manual,
            ..Default::default()
        })
        .with_mode(LeverMode::Auto)
        .with_mode(LeverMode::Manual);
    scenario.update();
    assert_eq!(scenario.inputs().levers, manual);
}

#[test]
fn test_projection_uses_auto_levers() {
    let mut scenario = TestScenario::reference().with_mode(LeverMode::Auto);
    scenario.update();
    let expected = crate::aqi_projection::simulate(
        250.0,
        &scenario.inputs().baseline,
        &PM10_DOMINANT_PRESET,
        crate::aqi_projection::AqiModel::Weighted,
    );
    assert_eq!(scenario.projection(), &expected);
}
