//! Property tests over the whole lever and reading domain.

use policy_sim::aqi_projection::{simulate, AqiModel};
use policy_sim::health_index::compute_health_index;
use policy_sim::impact::assess_impact;
use policy_sim::levers::InterventionLevels;
use policy_sim::numeric::round_half_up;
use policy_sim::pollutant_projection::{project_pollutants, PROJECTED_POLLUTANTS};
use policy_sim::pollutants::PollutantReadings;
use proptest::prelude::*;

fn lever() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

fn reading() -> impl Strategy<Value = f64> {
    0.0..2000.0f64
}

fn in_percent(v: f64) -> bool {
    v.is_finite() && (0.0..=100.0).contains(&v)
}

proptest! {
    #[test]
    fn prop_outputs_bounded(
        t in lever(), c in lever(), i in lever(),
        pm25 in reading(), pm10 in reading(), no2 in reading(),
        aqi in 0.0..1000.0f64,
    ) {
        let baseline = PollutantReadings::from_core(pm25, pm10, no2);
        let levers = InterventionLevels::new(t, c, i);
        for model in [AqiModel::Weighted, AqiModel::Linear] {
            let result = simulate(aqi, &baseline, &levers, model);
            prop_assert!(result.projected_aqi.is_finite() && result.projected_aqi >= 0.0);
            prop_assert!(result.projected_aqi <= round_half_up(aqi));
            for p in PROJECTED_POLLUTANTS {
                let v = result.projected_pollutants.get(p);
                prop_assert!(v.is_finite() && v >= 0.0);
            }

            let impact = assess_impact(aqi, result.projected_aqi, pm25);
            prop_assert!(in_percent(impact.productivity_loss_percent));
            prop_assert!(in_percent(impact.healthcare_burden_percent));
            prop_assert!(in_percent(impact.risk_score));
        }
    }

    #[test]
    fn prop_health_index_bounded(
        aqi in -100.0..2000.0f64,
        hotspots in -10.0..500.0f64,
        anomalies in -10.0..500.0f64,
    ) {
        let r = compute_health_index(aqi, hotspots, anomalies, None);
        prop_assert!(in_percent(r.aqi_impact_score));
        prop_assert!(in_percent(r.hotspot_score));
        prop_assert!(in_percent(r.anomaly_score));
        prop_assert!(in_percent(r.overall_score));
        prop_assert!(r.anomaly_density_percent <= 75.0);
    }

    #[test]
    fn prop_idempotent(
        t in lever(), c in lever(), i in lever(),
        pm25 in reading(), pm10 in reading(), no2 in reading(),
        aqi in 0.0..1000.0f64,
    ) {
        let baseline = PollutantReadings::from_core(pm25, pm10, no2);
        let levers = InterventionLevels::new(t, c, i);
        let first = simulate(aqi, &baseline, &levers, AqiModel::Weighted);
        let second = simulate(aqi, &baseline, &levers, AqiModel::Weighted);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_raising_a_lever_never_raises_a_pollutant(
        t in lever(), c in lever(), i in lever(), bump in 0.0..=100.0f64,
        pm25 in reading(), pm10 in reading(), no2 in reading(),
    ) {
        let baseline = PollutantReadings::from_core(pm25, pm10, no2);
        let before = project_pollutants(&baseline, &InterventionLevels::new(t, c, i));
        for raised in [
            InterventionLevels::new(t + bump, c, i),
            InterventionLevels::new(t, c + bump, i),
            InterventionLevels::new(t, c, i + bump),
        ] {
            let after = project_pollutants(&baseline, &raised);
            for p in PROJECTED_POLLUTANTS {
                prop_assert!(after.get(p) <= before.get(p), "{:?} rose", p);
            }
        }
    }

    #[test]
    fn prop_no_levers_keep_baseline(
        pm25 in reading(), pm10 in reading(), no2 in reading(),
    ) {
        let baseline = PollutantReadings::from_core(pm25, pm10, no2);
        let projected = project_pollutants(&baseline, &InterventionLevels::NONE);
        for p in PROJECTED_POLLUTANTS {
            prop_assert_eq!(projected.get(p), round_half_up(baseline.get(p)));
        }
    }

    #[test]
    fn prop_no_lives_without_improvement(
        baseline_aqi in 0.0..1000.0f64,
        worse_by in 0.0..500.0f64,
        pm25 in reading(),
    ) {
        let impact = assess_impact(baseline_aqi, baseline_aqi + worse_by, pm25);
        prop_assert_eq!(impact.lives_protected_estimate, 0);
    }
}
