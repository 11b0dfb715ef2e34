use gridnav_core::{Coord, Grid, NodeId, Vec3};

/// An ordered route from start to goal, both inclusive.
///
/// An empty path means no route was found. A single-node path means the
/// start already is the goal; there is nothing to walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>, cost: i32) -> Self {
        Self { nodes, cost }
    }

    /// Node ids from start to goal.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Accumulated step cost (10 per orthogonal, 14 per diagonal step).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the path is just the start node.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.nodes.iter()
    }

    /// Coordinates of each node in `grid`.
    pub fn coords(&self, grid: &Grid) -> Vec<Coord> {
        self.nodes.iter().filter_map(|&id| grid.coord(id)).collect()
    }

    /// World positions of each node in `grid`.
    pub fn waypoints(&self, grid: &Grid) -> Vec<Vec3> {
        self.nodes
            .iter()
            .filter_map(|&id| grid.world_position(id))
            .collect()
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
