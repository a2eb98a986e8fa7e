//! Particle state for the relaxation solver
//!
//! Parallel arrays indexed by particle; index `i` is the same particle in
//! every array for the lifetime of the store.

use crate::geometry::Container;
use crate::math::{Real, Vector, linear_falloff, zero_vector};

use super::noise::NoiseSource;
use super::spawn::SpawnRegion;

/// Per-particle scratch reused by the relaxation pass.
#[derive(Clone, Debug, Default)]
pub struct RelaxScratch {
    /// Accepted neighbors of the particle currently being relaxed.
    pub neighbors: Vec<usize>,
    /// Kernel weight of each neighbor, indexed by neighbor particle.
    pub gradient: Vec<Real>,
    /// Distance to each neighbor, indexed by neighbor particle.
    pub distance: Vec<Real>,
    /// Candidate indices produced by the neighbor grid.
    pub candidates: Vec<usize>,
    /// Deferred corrections when relaxing from a frozen snapshot.
    pub corrections: Vec<Vector>,
}

impl RelaxScratch {
    fn with_len(count: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(count),
            gradient: vec![0.0; count],
            distance: vec![0.0; count],
            candidates: Vec::with_capacity(count),
            corrections: vec![zero_vector(); count],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticleStore {
    positions: Vec<Vector>,
    velocities: Vec<Vector>,
    previous_positions: Vec<Vector>,
    scratch: RelaxScratch,
}

impl ParticleStore {
    /// Allocate `count` particles at the origin, at rest.
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![zero_vector(); count],
            velocities: vec![zero_vector(); count],
            previous_positions: vec![zero_vector(); count],
            scratch: RelaxScratch::with_len(count),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    pub fn previous_positions(&self) -> &[Vector] {
        &self.previous_positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vector] {
        &mut self.positions
    }

    pub fn velocities_mut(&mut self) -> &mut [Vector] {
        &mut self.velocities
    }

    /// Place a single particle. Out-of-range indices are ignored.
    pub fn set_particle(&mut self, index: usize, position: Vector, velocity: Vector) {
        if index >= self.len() {
            return;
        }
        self.positions[index] = position;
        self.previous_positions[index] = position;
        self.velocities[index] = velocity;
    }

    /// Mutable access to the three state arrays at once.
    pub fn state_mut(&mut self) -> (&mut [Vector], &mut [Vector], &mut [Vector]) {
        (
            &mut self.positions,
            &mut self.velocities,
            &mut self.previous_positions,
        )
    }

    pub fn positions_and_scratch_mut(&mut self) -> (&mut [Vector], &mut RelaxScratch) {
        (&mut self.positions, &mut self.scratch)
    }

    /// Scatter every particle uniformly over `region` and bring it to rest.
    pub fn scatter(
        &mut self,
        region: &SpawnRegion,
        container: &Container,
        noise: &mut dyn NoiseSource,
    ) {
        for ((position, velocity), previous) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.previous_positions.iter_mut())
        {
            *position = region.sample(container, noise);
            *previous = *position;
            *velocity = zero_vector();
        }
    }

    /// Radial impulse around `center` with linear falloff.
    ///
    /// Every particle closer than `radius` gains `unit * (1 - d / radius) * strength`
    /// velocity, pointing away from `center`. Particles exactly at `center`
    /// have no direction and are skipped. Returns the number of particles hit.
    pub fn add_force_at(&mut self, center: Vector, radius: Real, strength: Real) -> usize {
        let radius_sq = radius * radius;
        let mut affected = 0;

        for (position, velocity) in self.positions.iter().zip(self.velocities.iter_mut()) {
            let offset = *position - center;
            let sq = offset.length_squared();
            if sq > radius_sq {
                continue;
            }

            let len = sq.sqrt();
            let g = linear_falloff(len, radius);
            if g == 0.0 || len == 0.0 || !g.is_finite() {
                continue;
            }

            *velocity += (offset / len) * g * strength;
            affected += 1;
        }

        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::noise::SeededNoise;
    use bevy::math::Vec2;

    #[test]
    fn arrays_share_length() {
        let store = ParticleStore::new(12);
        assert_eq!(store.len(), 12);
        assert_eq!(store.velocities().len(), 12);
        assert_eq!(store.previous_positions().len(), 12);
    }

    #[test]
    fn scatter_zeroes_velocity_and_stays_in_region() {
        let container = Container::from_size(200.0, 100.0);
        let mut store = ParticleStore::new(64);
        store.velocities_mut().fill(Vec2::splat(9.0));

        store.scatter(&SpawnRegion::Container, &container, &mut SeededNoise::new(1));

        assert!(store.velocities().iter().all(|v| *v == Vec2::ZERO));
        assert!(store.positions().iter().all(|p| container.contains(*p)));
    }

    #[test]
    fn force_pushes_away_with_linear_falloff() {
        let mut store = ParticleStore::new(3);
        store.set_particle(0, Vec2::new(10.0, 0.0), Vec2::ZERO);
        store.set_particle(1, Vec2::new(0.0, -50.0), Vec2::ZERO);
        store.set_particle(2, Vec2::new(200.0, 0.0), Vec2::ZERO);

        let hit = store.add_force_at(Vec2::ZERO, 100.0, 10.0);

        assert_eq!(hit, 2);
        let v0 = store.velocities()[0];
        assert!((v0.x - 9.0).abs() < 1e-5);
        assert_eq!(v0.y, 0.0);
        let v1 = store.velocities()[1];
        assert_eq!(v1.x, 0.0);
        assert!((v1.y + 5.0).abs() < 1e-5);
        assert_eq!(store.velocities()[2], Vec2::ZERO);
    }

    #[test]
    fn force_accumulates_per_call() {
        let mut store = ParticleStore::new(1);
        store.set_particle(0, Vec2::new(50.0, 0.0), Vec2::ZERO);

        store.add_force_at(Vec2::ZERO, 100.0, 2.0);
        let once = store.velocities()[0];
        store.add_force_at(Vec2::ZERO, 100.0, 2.0);

        assert!((store.velocities()[0] - once * 2.0).length() < 1e-5);
    }

    #[test]
    fn force_skips_particle_at_center() {
        let mut store = ParticleStore::new(1);
        store.set_particle(0, Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert_eq!(store.add_force_at(Vec2::new(5.0, 5.0), 10.0, 100.0), 0);
        assert_eq!(store.velocities()[0], Vec2::ZERO);
    }
}
