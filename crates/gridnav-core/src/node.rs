//! [`GridNode`], a single lattice cell, and its [`NodeId`] handle.

use std::fmt;

use crate::geom::Coord;

/// Display tag of a clear cell.
pub const CLEAR_TAG: char = '.';
/// Display tag of an occupied cell.
pub const BLOCKED_TAG: char = 'B';

/// Stable row-major index of a node inside its [`Grid`](crate::Grid).
///
/// This is the only handle other components keep into a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One cell of the navigation grid.
///
/// Nodes are created by the grid that owns them and never outlive it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridNode {
    id: NodeId,
    coord: Coord,
    clear: bool,
    tag: char,
}

impl GridNode {
    pub(crate) fn new(id: NodeId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            clear: true,
            tag: CLEAR_TAG,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.coord.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.coord.col
    }

    /// Whether the node may be walked through or used as a path endpoint.
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.clear
    }

    /// Single-character label used by diagnostic dumps.
    #[inline]
    pub fn tag(&self) -> char {
        self.tag
    }

    pub(crate) fn set_clear(&mut self) {
        self.clear = true;
        self.tag = CLEAR_TAG;
    }

    pub(crate) fn set_occupied(&mut self) {
        self.clear = false;
        self.tag = BLOCKED_TAG;
    }
}
