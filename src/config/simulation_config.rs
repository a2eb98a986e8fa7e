use bevy::math::Vec2;

use crate::core::SpawnRegion;
use crate::error::ConfigError;
use crate::geometry::Container;
use crate::math::Real;

use super::constants::*;

/// How the density relaxation pass applies its position corrections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelaxationOrder {
    /// Corrections are written in place while scanning, so later particles
    /// see positions already adjusted for earlier ones.
    #[default]
    GaussSeidel,
    /// Corrections are computed from the positions at the start of the pass
    /// and applied together once every particle has been visited.
    Jacobi,
}

/// Strategy used to find candidate neighbors in the relaxation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighborSearch {
    /// Scan every other particle.
    #[default]
    BruteForce,
    /// Bucket particles into interaction-radius cells and scan the 3x3 block.
    SpatialGrid,
}

/// Parameters of a liquid simulation.
///
/// Fixed for the lifetime of a [`LiquidState`](crate::LiquidState); swapping it
/// re-allocates and re-spawns every particle.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: u32,

    /// Neighbor cutoff distance (h).
    pub interaction_radius: Real,

    /// Pressure response to density above the rest density.
    pub stiffness: Real,

    /// Pressure response to near-density; keeps particles from clumping.
    pub stiffness_near: Real,

    pub rest_density: Real,

    /// Downward (positive y) acceleration.
    pub gravity: Real,

    /// Amplitude of the per-step velocity jitter.
    pub random_motion: Real,

    pub container: Container,

    /// Radius of the impulse applied by `add_force_at`.
    pub force_radius: Real,

    /// Ceiling applied to `dt` before integrating.
    pub max_time_step: Real,

    pub spawn: SpawnRegion,
    pub relaxation: RelaxationOrder,
    pub neighbor_search: NeighborSearch,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            interaction_radius: INTERACTION_RADIUS,
            stiffness: STIFFNESS,
            stiffness_near: STIFFNESS_NEAR,
            rest_density: REST_DENSITY,
            gravity: GRAVITY,
            random_motion: RANDOM_MOTION,
            container: Container::default(),
            force_radius: FORCE_RADIUS,
            max_time_step: MAX_TIME_STEP,
            spawn: SpawnRegion::Container,
            relaxation: RelaxationOrder::default(),
            neighbor_search: NeighborSearch::default(),
        }
    }
}

impl SimulationConfig {
    /// Particles scattered over the whole container.
    pub fn webgl_fluid() -> Self {
        Self::default()
    }

    /// A denser body of liquid dropped from the upper middle of the container.
    pub fn will_spill() -> Self {
        Self {
            particle_count: 300,
            spawn: SpawnRegion::drop_zone(),
            ..Self::default()
        }
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_interaction_radius(mut self, radius: Real) -> Self {
        self.interaction_radius = radius;
        self
    }

    pub fn with_stiffness(mut self, stiffness: Real, stiffness_near: Real) -> Self {
        self.stiffness = stiffness;
        self.stiffness_near = stiffness_near;
        self
    }

    pub fn with_rest_density(mut self, rest_density: Real) -> Self {
        self.rest_density = rest_density;
        self
    }

    pub fn with_gravity(mut self, gravity: Real) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_random_motion(mut self, random_motion: Real) -> Self {
        self.random_motion = random_motion;
        self
    }

    pub fn with_bounds(mut self, width: Real, height: Real) -> Self {
        self.container = Container::from_size(width, height);
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    pub fn with_force_radius(mut self, radius: Real) -> Self {
        self.force_radius = radius;
        self
    }

    pub fn with_max_time_step(mut self, max_time_step: Real) -> Self {
        self.max_time_step = max_time_step;
        self
    }

    pub fn with_spawn(mut self, spawn: SpawnRegion) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_relaxation(mut self, relaxation: RelaxationOrder) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_neighbor_search(mut self, neighbor_search: NeighborSearch) -> Self {
        self.neighbor_search = neighbor_search;
        self
    }

    /// Container size as `(width, height)`.
    pub fn bounds(&self) -> Vec2 {
        self.container.size()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyParticleCount);
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(ConfigError::InvalidInteractionRadius(self.interaction_radius));
        }
        if !(self.force_radius.is_finite() && self.force_radius > 0.0) {
            return Err(ConfigError::InvalidForceRadius(self.force_radius));
        }
        if !(self.max_time_step.is_finite() && self.max_time_step > 0.0) {
            return Err(ConfigError::InvalidMaxTimeStep(self.max_time_step));
        }
        if !self.container.is_valid() {
            return Err(ConfigError::InvalidContainer {
                min: self.container.min.to_array(),
                max: self.container.max.to_array(),
            });
        }

        let scalars = [
            ("stiffness", self.stiffness),
            ("stiffness_near", self.stiffness_near),
            ("rest_density", self.rest_density),
            ("gravity", self.gravity),
            ("random_motion", self.random_motion),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { name, value });
            }
        }

        self.spawn.validate()
    }
}
