use thiserror::Error;

use crate::math::Real;

/// Rejected simulation configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be at least 1")]
    EmptyParticleCount,
    #[error("interaction radius must be finite and positive, got {0}")]
    InvalidInteractionRadius(Real),
    #[error("force radius must be finite and positive, got {0}")]
    InvalidForceRadius(Real),
    #[error("maximum time step must be finite and positive, got {0}")]
    InvalidMaxTimeStep(Real),
    #[error("container must be finite with positive extent, got min={min:?} max={max:?}")]
    InvalidContainer { min: [Real; 2], max: [Real; 2] },
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: Real },
    #[error("spawn fraction must lie within [0, 1] with min <= max, got min={min:?} max={max:?}")]
    InvalidSpawnRegion { min: [Real; 2], max: [Real; 2] },
}
