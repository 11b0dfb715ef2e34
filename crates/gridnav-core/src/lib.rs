//! **gridnav-core**: the navigation lattice.
//!
//! This crate provides the types every other *gridnav* crate builds on:
//! lattice geometry, the fixed-size occupancy [`Grid`] with its 8-connected
//! adjacency and world-space mapping, diagnostic dumps, and text layouts.

pub mod dump;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod node;

pub use dump::Dump;
pub use geom::{Coord, DIAGONAL_COST, Direction, ORTHOGONAL_COST};
pub use grid::{DEFAULT_CELL_SIZE, Grid, GridError, octile_cost, octile_distance};
pub use layout::{Layout, LayoutError};
pub use node::{GridNode, NodeId};

pub use glam::Vec3;
