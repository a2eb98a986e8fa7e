use bevy::math::Vec2;

use crate::error::ConfigError;
use crate::geometry::Container;
use crate::math::{Vector, lerp_unit};

use super::noise::NoiseSource;

/// Region particles are scattered into by a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SpawnRegion {
    /// Anywhere inside the container.
    #[default]
    Container,
    /// A sub-rectangle given as fractions of the container size.
    Fraction { min: Vector, max: Vector },
}

impl SpawnRegion {
    /// Middle half horizontally, upper half vertically.
    pub fn drop_zone() -> Self {
        SpawnRegion::Fraction {
            min: Vec2::new(0.25, 0.0),
            max: Vec2::new(0.75, 0.5),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SpawnRegion::Container => Ok(()),
            SpawnRegion::Fraction { min, max } => {
                let in_unit = |v: Vector| (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y);
                if in_unit(min) && in_unit(max) && min.x <= max.x && min.y <= max.y {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidSpawnRegion {
                        min: min.to_array(),
                        max: max.to_array(),
                    })
                }
            }
        }
    }

    /// Absolute corners of the region inside `container`.
    pub fn resolve(&self, container: &Container) -> (Vector, Vector) {
        match *self {
            SpawnRegion::Container => (container.min, container.max),
            SpawnRegion::Fraction { min, max } => {
                let size = container.size();
                (container.min + min * size, container.min + max * size)
            }
        }
    }

    pub fn sample(&self, container: &Container, noise: &mut dyn NoiseSource) -> Vector {
        let (min, max) = self.resolve(container);
        let x = lerp_unit(min.x, max.x, noise.next_unit());
        let y = lerp_unit(min.y, max.y, noise.next_unit());
        Vec2::new(x, y)
    }
}
