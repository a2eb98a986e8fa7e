//! Rigid container walls and optional boundary shaping.

use bevy::math::Vec2;

use crate::math::{Real, Vector};

/// Axis-aligned box the particles are clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub min: Vector,
    pub max: Vector,
}

impl Container {
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    /// Container spanning `[0, width] x [0, height]`.
    pub fn from_size(width: Real, height: Real) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.width() > 0.0 && self.height() > 0.0
    }

    #[inline]
    pub fn contains(&self, position: Vector) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }

    /// Hard wall clamp. Infinitely rigid, no wall thickness.
    #[inline]
    pub fn clamp(&self, position: &mut Vector) {
        if position.x < self.min.x {
            position.x = self.min.x;
        } else if position.x > self.max.x {
            position.x = self.max.x;
        }
        if position.y < self.min.y {
            position.y = self.min.y;
        } else if position.y > self.max.y {
            position.y = self.max.y;
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::from_size(
            crate::config::CONTAINER_WIDTH,
            crate::config::CONTAINER_HEIGHT,
        )
    }
}

/// Extra, non-rectangular boundary shaping applied after the wall clamp.
///
/// The rectangular clamp runs again after every shape, so a shape may push a
/// particle slightly outside the box without breaking containment.
pub trait BoundaryShape: Send + Sync {
    fn constrain(&self, position: &mut Vector, container: &Container);
}

/// Diagonal cutoffs in both upper corners of the container.
///
/// Coordinates are container-relative with y pointing down, so "upper" means
/// the band `y < band` near the container's min edge. The wedge test sees the
/// already clamped position, so a particle past a wall is judged at the wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerWedges {
    /// Height of the band in which the wedges are active.
    pub band: Real,
    /// Manhattan reach of each wedge, measured from the bottom corner on the same side.
    pub reach: Real,
    /// Displacement applied per step to a particle inside a wedge.
    pub nudge: Real,
}

impl Default for CornerWedges {
    fn default() -> Self {
        Self {
            band: 256.0,
            reach: 730.0,
            nudge: 1.0,
        }
    }
}

impl BoundaryShape for CornerWedges {
    fn constrain(&self, position: &mut Vector, container: &Container) {
        let local = *position - container.min;
        if local.y >= self.band {
            return;
        }

        let width = container.width();
        let height = container.height();
        if local.x + (height - local.y) < self.reach {
            position.x += self.nudge;
            position.y -= self.nudge;
        }
        if (width - local.x) + (height - local.y) < self.reach {
            position.x -= self.nudge;
            position.y -= self.nudge;
        }
    }
}
