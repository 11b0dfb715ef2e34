use gridnav_core::{Coord, Grid};

use crate::astar::PathFinder;
use crate::path::Path;

/// One-shot pathfinding directly on a grid.
///
/// Each call allocates a fresh [`PathFinder`]; keep a finder around instead
/// when searching repeatedly.
pub trait FindPath {
    /// Shortest path from `start` to `goal`, empty when there is none.
    fn find_path(&self, start: Coord, goal: Coord) -> Path;
}

impl FindPath for Grid {
    fn find_path(&self, start: Coord, goal: Coord) -> Path {
        PathFinder::new().find_path(self, start, goal)
    }
}
