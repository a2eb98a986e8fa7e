//! Boundary pass
//!
//! Clamps particles into the container, runs any extra boundary shapes and
//! re-derives velocity from the net displacement of the whole step.

use crate::core::ParticleStore;
use crate::geometry::{BoundaryShape, Container};
use crate::math::{Real, zero_vector};

/// Summary of one boundary pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundaryStats {
    /// Particles restored after their state went non-finite.
    pub recovered: usize,
    pub max_speed: Real,
}

pub fn enforce_boundaries(
    store: &mut ParticleStore,
    container: &Container,
    shapes: &[Box<dyn BoundaryShape>],
    dt: Real,
) -> BoundaryStats {
    let inv_dt = 1.0 / dt;
    let (positions, velocities, previous_positions) = store.state_mut();
    let mut stats = BoundaryStats::default();

    for ((position, velocity), previous) in positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(previous_positions.iter())
    {
        container.clamp(position);
        if !shapes.is_empty() {
            for shape in shapes {
                shape.constrain(position, container);
            }
            container.clamp(position);
        }

        *velocity = (*position - *previous) * inv_dt;

        if !position.is_finite() || !velocity.is_finite() {
            *position = *previous;
            container.clamp(position);
            *velocity = zero_vector();
            stats.recovered += 1;
            continue;
        }

        stats.max_speed = stats.max_speed.max(velocity.length());
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CornerWedges;
    use bevy::math::Vec2;

    #[test]
    fn velocity_reflects_clamped_displacement() {
        let container = Container::from_size(100.0, 100.0);
        let mut store = ParticleStore::new(1);
        store.set_particle(0, Vec2::new(95.0, 50.0), Vec2::ZERO);
        store.positions_mut()[0] = Vec2::new(105.0, 50.0);

        let stats = enforce_boundaries(&mut store, &container, &[], 0.01);

        assert_eq!(store.positions()[0], Vec2::new(100.0, 50.0));
        assert!((store.velocities()[0].x - 500.0).abs() < 1e-2);
        assert_eq!(store.velocities()[0].y, 0.0);
        assert_eq!(stats.recovered, 0);
    }

    #[test]
    fn shapes_cannot_push_particles_outside() {
        let container = Container::from_size(800.0, 600.0);
        let shapes: Vec<Box<dyn BoundaryShape>> = vec![Box::new(CornerWedges::default())];
        let mut store = ParticleStore::new(1);
        store.set_particle(0, Vec2::new(0.0, 0.0), Vec2::ZERO);

        enforce_boundaries(&mut store, &container, &shapes, 0.01);

        let p = store.positions()[0];
        assert!(container.contains(p));
        assert_eq!(p, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn shapes_see_the_clamped_position() {
        let container = Container::from_size(800.0, 600.0);
        let shapes: Vec<Box<dyn BoundaryShape>> = vec![Box::new(CornerWedges::default())];
        let mut store = ParticleStore::new(1);
        store.set_particle(0, Vec2::new(5.0, 10.0), Vec2::ZERO);
        store.positions_mut()[0] = Vec2::new(-5.0, 10.0);

        enforce_boundaries(&mut store, &container, &shapes, 0.01);

        assert_eq!(store.positions()[0], Vec2::new(1.0, 9.0));
    }

    #[test]
    fn non_finite_particles_are_recovered() {
        let container = Container::from_size(10.0, 10.0);
        let mut store = ParticleStore::new(2);
        store.set_particle(0, Vec2::new(4.0, 4.0), Vec2::ZERO);
        store.set_particle(1, Vec2::new(6.0, 6.0), Vec2::ZERO);
        store.positions_mut()[0] = Vec2::new(f32::NAN, 1.0);

        let stats = enforce_boundaries(&mut store, &container, &[], 0.02);

        assert_eq!(stats.recovered, 1);
        assert_eq!(store.positions()[0], Vec2::new(4.0, 4.0));
        assert_eq!(store.velocities()[0], Vec2::ZERO);
        assert_eq!(store.positions()[1], Vec2::new(6.0, 6.0));
    }
}
