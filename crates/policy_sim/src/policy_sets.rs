//! Ordering of the engine's `Update` systems.
//!
//! ```text
//! Inputs  →  Projection  →  Assessment
//! ```
//!
//! * **Inputs** – Normalize scenario and monitoring inputs, apply the auto
//!   preset.
//! * **Projection** – Pollutant and AQI projection.
//! * **Assessment** – Impact, health index and recommendations. Reads the
//!   projection written earlier in the same frame.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain by [`crate::PolicySimPlugin`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PolicySimSet {
    Inputs,
    Projection,
    Assessment,
}
