//! The [`Grid`] type: a dense, fixed-size lattice of [`GridNode`]s.
//!
//! The grid owns every node. Everything else refers to nodes through
//! [`NodeId`] or [`Coord`], and every lookup that can fall off the lattice
//! returns `None` instead of panicking.

use std::fmt;

use glam::Vec3;

use crate::geom::{Coord, DIAGONAL_COST, Direction, ORTHOGONAL_COST};
use crate::node::{GridNode, NodeId};

/// Default edge length of one cell in world units.
pub const DEFAULT_CELL_SIZE: f32 = 10.0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while constructing a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Rows or columns were not strictly positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// The cell size was not a finite positive number.
    InvalidCellSize(f32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "grid: invalid dimensions {rows}x{cols}")
            }
            Self::InvalidCellSize(s) => write!(f, "grid: invalid cell size {s}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed `rows × cols` navigation lattice.
///
/// Node ids are assigned row-major (`row * cols + col`) at construction and
/// stay valid for the lifetime of the grid. All nodes start clear.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cell_size: f32,
    nodes: Vec<GridNode>,
}

impl Grid {
    /// Create an all-clear grid with the default cell size.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        Self::with_cell_size(rows, cols, DEFAULT_CELL_SIZE)
    }

    /// Create an all-clear grid whose cells measure `cell_size` world units.
    pub fn with_cell_size(rows: i32, cols: i32, cell_size: f32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        let mut nodes = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                let id = NodeId(nodes.len());
                nodes.push(GridNode::new(id, Coord::new(row, col)));
            }
        }
        log::debug!("grid: allocated {rows}x{cols} nodes (cell size {cell_size})");
        Ok(Self {
            rows,
            cols,
            cell_size,
            nodes,
        })
    }

    /// Create a grid with its final occupancy: cells for which `blocked`
    /// returns `true` start occupied.
    pub fn from_fn(
        rows: i32,
        cols: i32,
        mut blocked: impl FnMut(Coord) -> bool,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols)?;
        for node in grid.nodes.iter_mut() {
            if blocked(node.coord()) {
                node.set_occupied();
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a grid has at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `c` lies inside `[0, rows) × [0, cols)`.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, GridNode> {
        self.nodes.iter()
    }

    /// Number of clear nodes.
    pub fn clear_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_clear()).count()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The node at `c`, or `None` if `c` is off the grid.
    #[inline]
    pub fn node_at(&self, c: Coord) -> Option<NodeId> {
        if !self.contains(c) {
            return None;
        }
        Some(NodeId((c.row * self.cols + c.col) as usize))
    }

    /// Borrow the node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&GridNode> {
        self.nodes.get(id.0)
    }

    /// Coordinate of the node with the given id.
    #[inline]
    pub fn coord(&self, id: NodeId) -> Option<Coord> {
        self.node(id).map(GridNode::coord)
    }

    /// Whether `id` names a clear node. Unknown ids are never clear.
    #[inline]
    pub fn is_clear(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(GridNode::is_clear)
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// The neighbour of `id` in direction `d`.
    ///
    /// Diagonals are two orthogonal steps (vertical, then horizontal), so an
    /// edge that removes the orthogonal neighbour also removes the diagonal.
    pub fn neighbor(&self, id: NodeId, d: Direction) -> Option<NodeId> {
        match d.components() {
            Some((vertical, horizontal)) => self
                .neighbor(id, vertical)
                .and_then(|n| self.neighbor(n, horizontal)),
            None => self.node_at(self.coord(id)?.step(d)),
        }
    }

    /// All eight neighbours of `id` in [`Direction::CLOCKWISE`] order.
    pub fn all_neighbors(&self, id: NodeId) -> [Option<NodeId>; 8] {
        Direction::CLOCKWISE.map(|d| self.neighbor(id, d))
    }

    // -----------------------------------------------------------------------
    // Occupancy
    // -----------------------------------------------------------------------

    /// Mark a node as blocked. Returns `false` if `id` is unknown.
    pub fn set_occupied(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(n) => {
                n.set_occupied();
                true
            }
            None => false,
        }
    }

    /// Mark a node as walkable. Returns `false` if `id` is unknown.
    pub fn set_clear(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(n) => {
                n.set_clear();
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // World mapping
    // -----------------------------------------------------------------------

    /// World-space centre of the cell at `c`. The grid lies on the `y = 0`
    /// plane, centred on the origin, with rows along `z` and columns along
    /// `x`. Coordinates off the grid are extrapolated.
    pub fn world_position_at(&self, c: Coord) -> Vec3 {
        let s = self.cell_size;
        Vec3::new(
            c.col as f32 * s - self.cols as f32 * s / 2.0 + s / 2.0,
            0.0,
            c.row as f32 * s - self.rows as f32 * s / 2.0 + s / 2.0,
        )
    }

    /// World-space centre of the node `id`.
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.coord(id).map(|c| self.world_position_at(c))
    }

    /// The node nearest to `pos`. Positions off the grid clamp to the
    /// closest edge cell, so this never fails.
    pub fn node_near(&self, pos: Vec3) -> NodeId {
        let s = self.cell_size;
        let axis = |v: f32, n: i32| -> i32 {
            let cell = ((v - s / 2.0 + n as f32 * s / 2.0) / s).round();
            // `as` saturates, and maps NaN to 0.
            (cell as i32).clamp(0, n - 1)
        };
        let c = Coord::new(axis(pos.z, self.rows), axis(pos.x, self.cols));
        NodeId((c.row * self.cols + c.col) as usize)
    }

    // -----------------------------------------------------------------------
    // Distance
    // -----------------------------------------------------------------------

    /// Octile distance between two nodes scaled by ten, or `None` if either
    /// id is unknown. See [`octile_distance`].
    pub fn heuristic_distance(&self, a: NodeId, b: NodeId) -> Option<i32> {
        Some(octile_distance(self.coord(a)?, self.coord(b)?))
    }
}

/// Octile distance scaled by ten: `10·max + 4.1·min`, truncated.
///
/// Computed in integers so that the truncation is exact.
#[inline]
pub fn octile_distance(a: Coord, b: Coord) -> i32 {
    let (dr, dc) = a.delta(b);
    let (hi, lo) = (dr.max(dc), dr.min(dc));
    ORTHOGONAL_COST * hi + 41 * lo / 10
}

/// Exact octile path cost on an empty grid (`10·max + 4·min`).
#[inline]
pub fn octile_cost(a: Coord, b: Coord) -> i32 {
    let (dr, dc) = a.delta(b);
    let (hi, lo) = (dr.max(dc), dr.min(dc));
    ORTHOGONAL_COST * (hi - lo) + DIAGONAL_COST * lo
}
