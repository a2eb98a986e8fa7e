//! External force pass
//!
//! Snapshots positions, applies jitter and gravity to velocities, then moves
//! every particle along its velocity.

use crate::config::SimulationConfig;
use crate::core::{NoiseSource, ParticleStore};
use crate::math::Real;

pub fn apply_external_forces(
    store: &mut ParticleStore,
    config: &SimulationConfig,
    noise: &mut dyn NoiseSource,
    dt: Real,
) {
    let jitter = config.random_motion * dt * 2.0;
    let gravity_step = config.gravity * dt;
    let (positions, velocities, previous_positions) = store.state_mut();

    for ((position, velocity), previous) in positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(previous_positions.iter_mut())
    {
        *previous = *position;

        // Skipped entirely at zero amplitude so the noise stream is untouched.
        if config.random_motion != 0.0 {
            velocity.x += noise.next_centered() * jitter;
            velocity.y += noise.next_centered() * jitter;
        }

        velocity.y += gravity_step;
        *position += *velocity * dt;
    }
}
