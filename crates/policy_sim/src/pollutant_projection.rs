//! Projected pollutant concentrations under an intervention scenario.
//!
//! Each modeled pollutant is reduced by a fixed weighted blend of the levers:
//!
//! | Pollutant | Traffic | Construction | Industrial |
//! |-----------|---------|--------------|------------|
//! | PM2.5     | 0.4     | -            | 0.3        |
//! | PM10      | 0.2     | 0.5          | -          |
//! | NO2       | 0.5     | -            | 0.4        |
//!
//! Traffic and industry drive the combustion-linked pollutants; construction
//! dominates coarse particulate. Reductions are fractions of the baseline, so
//! projections never go below zero.

use crate::levers::InterventionLevels;
use crate::numeric::round_half_up;
use crate::pollutants::{Pollutant, PollutantReadings};

const PM25_TRAFFIC_WEIGHT: f64 = 0.4;
const PM25_INDUSTRIAL_WEIGHT: f64 = 0.3;

const PM10_CONSTRUCTION_WEIGHT: f64 = 0.5;
const PM10_TRAFFIC_WEIGHT: f64 = 0.2;

const NO2_TRAFFIC_WEIGHT: f64 = 0.5;
const NO2_INDUSTRIAL_WEIGHT: f64 = 0.4;

/// Pollutants the projection model covers.
pub const PROJECTED_POLLUTANTS: [Pollutant; 3] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::No2];

/// Fractional reduction (0..=0.9) applied to each modeled pollutant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionFactors {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
}

impl ReductionFactors {
    pub fn for_pollutant(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            _ => 0.0,
        }
    }
}

/// Reduction fractions implied by `levers`.
pub fn reduction_factors(levers: &InterventionLevels) -> ReductionFactors {
    let l = levers.sanitized();
    ReductionFactors {
        pm25: (l.traffic_reduction * PM25_TRAFFIC_WEIGHT
            + l.industrial_control * PM25_INDUSTRIAL_WEIGHT)
            / 100.0,
        pm10: (l.construction_control * PM10_CONSTRUCTION_WEIGHT
            + l.traffic_reduction * PM10_TRAFFIC_WEIGHT)
            / 100.0,
        no2: (l.traffic_reduction * NO2_TRAFFIC_WEIGHT + l.industrial_control * NO2_INDUSTRIAL_WEIGHT)
            / 100.0,
    }
}

/// Project PM2.5, PM10 and NO2 under `levers`.
///
/// Missing baseline pollutants read as 0. The result always contains exactly
/// the three modeled pollutants, each rounded to a whole number.
pub fn project_pollutants(
    baseline: &PollutantReadings,
    levers: &InterventionLevels,
) -> PollutantReadings {
    let factors = reduction_factors(levers);
    let mut projected = PollutantReadings::new();
    for pollutant in PROJECTED_POLLUTANTS {
        let base = baseline.get(pollutant);
        let reduced = round_half_up(base * (1.0 - factors.for_pollutant(pollutant)));
        projected.set(pollutant, reduced.max(0.0));
    }
    projected
}
