//! Step passes
//!
//! External forces, density relaxation, then boundaries and velocity.

pub mod boundary;
pub mod integrate;
pub mod relax;
pub mod report;

pub use boundary::{BoundaryStats, enforce_boundaries};
pub use integrate::apply_external_forces;
pub use relax::{RelaxStats, relax_density};
pub use report::StepReport;

use bevy::prelude::*;

use crate::core::LiquidState;

/// Advance the liquid by the frame delta.
pub fn step_liquid(time: Res<Time>, mut state: ResMut<LiquidState>) {
    state.step(time.delta_secs());
}
