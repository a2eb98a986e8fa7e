// Observed defaults of the relaxation solver (canvas pixel units, y pointing down)

pub const PARTICLE_COUNT: u32 = 100;
pub const INTERACTION_RADIUS: f32 = 50.0;

// Pressure response to density excess ("attraction")
pub const STIFFNESS: f32 = 10000.0;
// Pressure response to near-density ("spread")
pub const STIFFNESS_NEAR: f32 = 10000.0;
pub const REST_DENSITY: f32 = 2.0;

pub const GRAVITY: f32 = 1000.0;
pub const RANDOM_MOTION: f32 = 20.0;

/// Largest time step integrated by a single `step` call.
pub const MAX_TIME_STEP: f32 = 0.02;

/// Radius of the user-driven impulse applied by `add_force_at`.
pub const FORCE_RADIUS: f32 = 100.0;

pub const CONTAINER_WIDTH: f32 = 800.0;
pub const CONTAINER_HEIGHT: f32 = 600.0;
