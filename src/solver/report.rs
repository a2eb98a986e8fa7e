use crate::math::Real;

use super::boundary::BoundaryStats;
use super::relax::RelaxStats;

/// What the last non-trivial `step` did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Time step actually integrated, after capping.
    pub dt: Real,
    /// The requested `dt` exceeded the ceiling.
    pub clamped: bool,
    pub neighbor_pairs: usize,
    pub max_density: Real,
    pub max_speed: Real,
    pub recovered: usize,
}

impl StepReport {
    pub fn new(dt: Real, clamped: bool, relax: RelaxStats, boundary: BoundaryStats) -> Self {
        Self {
            dt,
            clamped,
            neighbor_pairs: relax.neighbor_pairs,
            max_density: relax.max_density,
            max_speed: boundary.max_speed,
            recovered: boundary.recovered,
        }
    }
}
