//! Spatial structures
//!
//! Container walls, boundary shapes and the neighbor grid.

pub mod container;
pub mod sp_grid;

pub use container::{BoundaryShape, Container, CornerWedges};
pub use sp_grid::{NeighborGrid, PackedCell, cell_from_position};
