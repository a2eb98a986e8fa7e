use bevy::prelude::IVec2;
use indexmap::IndexMap;

use crate::math::{Real, Vector};

pub type PackedCell = u64;

const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
pub fn pack_coords(ix: i32, iy: i32) -> PackedCell {
    ((ix as u64) << 32) | (iy as u32 as u64)
}

/// Convert a position into the coordinate of the cell containing it.
///
/// The division runs in f64 so two points closer than `cell_width` never land
/// more than one cell apart. Far-out and infinite coordinates saturate to the
/// outermost cell, NaN lands in cell 0.
#[inline]
pub fn cell_from_position(position: Vector, cell_width: Real) -> IVec2 {
    let width = cell_width as f64;
    IVec2::new(
        (position.x as f64 / width).floor() as i32,
        (position.y as f64 / width).floor() as i32,
    )
}

/// Sparse uniform grid bucketing particle indices by cell.
///
/// With `cell_width` equal to the interaction radius every neighbor of a
/// particle lies in the 3x3 block of cells around it.
#[derive(Clone, Debug)]
pub struct NeighborGrid {
    cell_width: Real,
    cells: IndexMap<PackedCell, Vec<usize>>,
}

impl NeighborGrid {
    pub fn new(cell_width: Real) -> Self {
        Self {
            cell_width,
            cells: IndexMap::new(),
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn cell_key(&self, position: Vector) -> PackedCell {
        let coord = cell_from_position(position, self.cell_width);
        pack_coords(coord.x, coord.y)
    }

    /// Re-bucket all positions. Bucket allocations are reused between calls.
    pub fn rebuild(&mut self, positions: &[Vector]) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }

        for (idx, &position) in positions.iter().enumerate() {
            let key = self.cell_key(position);
            self.cells.entry(key).or_default().push(idx);
        }

        self.cells.retain(|_, bucket| !bucket.is_empty());
    }

    /// Move `idx` to the bucket of `to` if it left the cell of `from`.
    ///
    /// `from` must be the position `idx` was last bucketed at.
    pub fn relocate(&mut self, idx: usize, from: Vector, to: Vector) {
        let old_key = self.cell_key(from);
        let new_key = self.cell_key(to);
        if old_key == new_key {
            return;
        }

        if let Some(bucket) = self.cells.get_mut(&old_key) {
            if let Some(slot) = bucket.iter().position(|&i| i == idx) {
                bucket.swap_remove(slot);
            }
        }
        self.cells.entry(new_key).or_default().push(idx);
    }

    /// Collect the indices in the 3x3 block around `position`, ascending and
    /// without duplicates.
    pub fn candidates(&self, position: Vector, out: &mut Vec<usize>) {
        out.clear();
        let base = cell_from_position(position, self.cell_width);
        let mut visited = [0; 9];
        for (slot, (dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let key = pack_coords(base.x.saturating_add(*dx), base.y.saturating_add(*dy));
            visited[slot] = key;
            // Saturated edge cells repeat in the block; visit each once.
            if visited[..slot].contains(&key) {
                continue;
            }
            if let Some(bucket) = self.cells.get(&key) {
                out.extend_from_slice(bucket);
            }
        }
        out.sort_unstable();
    }
}
