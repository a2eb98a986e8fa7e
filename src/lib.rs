//! 2D particle liquid using double density relaxation.
//!
//! The simulation is pure data plus three passes per step; hosts read
//! positions and velocities back to draw them.

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{NeighborSearch, RelaxationOrder, SimulationConfig};
pub use crate::core::{
    LiquidState, NoiseSource, ParticleStore, SeededNoise, SilentNoise, SpawnRegion,
};
pub use crate::error::ConfigError;
pub use crate::geometry::{BoundaryShape, Container, CornerWedges};
pub use crate::solver::{StepReport, step_liquid};

/// Inserts a [`LiquidState`] resource and steps it every frame.
pub struct LiquidPlugin {
    config: SimulationConfig,
    seed: Option<u64>,
    corner_wedges: bool,
}

impl LiquidPlugin {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            seed: None,
            corner_wedges: false,
        })
    }

    /// Use a fixed seed for jitter and spawning.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cut the upper corners of the container diagonally.
    pub fn with_corner_wedges(mut self) -> Self {
        self.corner_wedges = true;
        self
    }

    fn build_state(&self) -> Result<LiquidState, ConfigError> {
        let noise = match self.seed {
            Some(seed) => SeededNoise::new(seed),
            None => SeededNoise::from_entropy(),
        };
        let mut state = LiquidState::with_noise(self.config.clone(), noise)?;
        if self.corner_wedges {
            state.add_boundary_shape(CornerWedges::default());
        }
        Ok(state)
    }
}

impl Plugin for LiquidPlugin {
    fn build(&self, app: &mut App) {
        match self.build_state() {
            Ok(state) => {
                app.insert_resource(state)
                    .add_systems(Update, step_liquid);
            }
            Err(err) => error!("liquid: plugin disabled, {err}"),
        }
    }
}
