use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

/// Linear falloff `1 - distance / radius`, the smoothing kernel of the solver.
#[inline(always)]
pub fn linear_falloff(distance: Real, radius: Real) -> Real {
    1.0 - distance / radius
}

/// Uniform sample in `[0, 1)` mapped to `[min, max)`.
#[inline(always)]
pub fn lerp_unit(min: Real, max: Real, unit: Real) -> Real {
    min + (max - min) * unit
}
