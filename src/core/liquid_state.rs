use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::geometry::{BoundaryShape, NeighborGrid};
use crate::math::{Real, Vector};
use crate::solver::{StepReport, apply_external_forces, enforce_boundaries, relax_density};

use super::noise::{NoiseSource, SeededNoise};
use super::particle_store::ParticleStore;

/// A running liquid simulation: configuration, particles and the noise used
/// for jitter and spawning.
#[derive(Resource)]
pub struct LiquidState {
    config: SimulationConfig,
    store: ParticleStore,
    noise: Box<dyn NoiseSource>,
    shapes: Vec<Box<dyn BoundaryShape>>,
    grid: NeighborGrid,
    last_report: StepReport,
    steps: u64,
}

impl LiquidState {
    /// Validate `config`, allocate the particles and scatter them.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_noise(config, SeededNoise::from_entropy())
    }

    pub fn with_noise(
        config: SimulationConfig,
        noise: impl NoiseSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = Self {
            store: ParticleStore::new(config.particle_count as usize),
            grid: NeighborGrid::new(config.interaction_radius),
            config,
            noise: Box::new(noise),
            shapes: Vec::new(),
            last_report: StepReport::default(),
            steps: 0,
        };
        info!(
            "liquid: {} particles, h={}, container={:?}",
            state.config.particle_count, state.config.interaction_radius, state.config.container
        );
        state.reset();
        Ok(state)
    }

    pub fn with_boundary_shape(mut self, shape: impl BoundaryShape + 'static) -> Self {
        self.add_boundary_shape(shape);
        self
    }

    pub fn add_boundary_shape(&mut self, shape: impl BoundaryShape + 'static) {
        self.shapes.push(Box::new(shape));
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration. The store is re-allocated for the new
    /// particle count and re-spawned; on error nothing changes.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;

        self.store = ParticleStore::new(config.particle_count as usize);
        self.grid = NeighborGrid::new(config.interaction_radius);
        self.config = config;
        self.last_report = StepReport::default();
        info!(
            "liquid: config swapped, {} particles",
            self.config.particle_count
        );
        self.reset();
        Ok(())
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Direct access for hosts that seed exact particle states.
    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn positions(&self) -> &[Vector] {
        self.store.positions()
    }

    pub fn velocities(&self) -> &[Vector] {
        self.store.velocities()
    }

    pub fn previous_positions(&self) -> &[Vector] {
        self.store.previous_positions()
    }

    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    /// Number of steps integrated since construction (no-op calls excluded).
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Scatter all particles over the spawn region, at rest.
    pub fn reset(&mut self) {
        self.store
            .scatter(&self.config.spawn, &self.config.container, &mut *self.noise);
        debug!("liquid: reset {} particles", self.store.len());
    }

    /// Push particles within the force radius of `(x, y)` away from it.
    ///
    /// Returns the number of particles affected. The impulse lands in the
    /// velocities and is consumed by the next `step`.
    pub fn add_force_at(&mut self, x: Real, y: Real, strength: Real) -> usize {
        self.store
            .add_force_at(Vec2::new(x, y), self.config.force_radius, strength)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Non-positive or NaN `dt` is a no-op. Larger steps than the configured
    /// ceiling are capped, the relaxation only stays well-behaved for small
    /// steps.
    pub fn step(&mut self, dt: Real) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let clamped = dt > self.config.max_time_step;
        let dt = dt.min(self.config.max_time_step);

        apply_external_forces(&mut self.store, &self.config, &mut *self.noise, dt);
        let relax = relax_density(&mut self.store, &self.config, &mut self.grid, dt);
        let boundary = enforce_boundaries(
            &mut self.store,
            &self.config.container,
            &self.shapes,
            dt,
        );

        self.last_report = StepReport::new(dt, clamped, relax, boundary);
        self.steps += 1;

        if boundary.recovered > 0 {
            warn!(
                "liquid: step {} recovered {} non-finite particles",
                self.steps, boundary.recovered
            );
        }
        debug!(
            "liquid: step {} dt={:.4}{} pairs={} max_density={:.3} max_speed={:.1}",
            self.steps,
            dt,
            if clamped { " (capped)" } else { "" },
            relax.neighbor_pairs,
            relax.max_density,
            boundary.max_speed
        );
    }
}
