use std::fmt;

use gridnav_core::{
    Coord, DIAGONAL_COST, Direction, Grid, NodeId, ORTHOGONAL_COST, octile_distance,
};

use crate::config::SearchConfig;
use crate::context::{Membership, SearchContext};
use crate::path::Path;

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies off the grid.
    OutOfBounds(Coord),
    /// The goal cell is occupied.
    GoalOccupied(Coord),
    /// The open set ran dry before reaching the goal.
    Unreachable,
    /// The expansion budget ran out before reaching the goal.
    BudgetExhausted { expanded: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "endpoint {c} is off the grid"),
            Self::GoalOccupied(c) => write!(f, "goal {c} is occupied"),
            Self::Unreachable => f.write_str("no route to goal"),
            Self::BudgetExhausted { expanded } => {
                write!(f, "gave up after expanding {expanded} nodes")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A* search over a [`Grid`] with 8-way movement.
///
/// `PathFinder` owns its [`SearchContext`], so repeated searches reuse the
/// same allocations and several finders can search one grid concurrently.
#[derive(Debug, Default)]
pub struct PathFinder {
    config: SearchConfig,
    ctx: SearchContext,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ctx: SearchContext::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// The scratch state. Clean whenever no search is running.
    #[inline]
    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Shortest path from `start` to `goal`, or an empty path when there is
    /// none. See [`try_find_path`](Self::try_find_path) for the reason.
    pub fn find_path(&mut self, grid: &Grid, start: Coord, goal: Coord) -> Path {
        match self.try_find_path(grid, start, goal) {
            Ok(path) => path,
            Err(e) => {
                log::debug!("astar: {start} -> {goal}: {e}");
                Path::default()
            }
        }
    }

    /// Shortest path from `start` to `goal`.
    ///
    /// Diagonal steps cost 14 and orthogonal steps 10. A diagonal step is
    /// only taken when both orthogonal cells beside it are clear. The start
    /// cell itself may be occupied; the goal may not. When `start == goal`
    /// the path is that single node.
    pub fn try_find_path(
        &mut self,
        grid: &Grid,
        start: Coord,
        goal: Coord,
    ) -> Result<Path, PathError> {
        let start_id = grid.node_at(start).ok_or(PathError::OutOfBounds(start))?;
        let goal_id = grid.node_at(goal).ok_or(PathError::OutOfBounds(goal))?;
        if !grid.is_clear(goal_id) {
            return Err(PathError::GoalOccupied(goal));
        }

        self.ctx.prepare(grid.len());
        let estimate = |id: NodeId| grid.coord(id).map_or(0, |c| octile_distance(c, goal));
        let result = self.search(grid, start_id, goal_id, estimate);
        if let Ok(path) = &result {
            log::debug!(
                "astar: {start} -> {goal}: {} nodes, cost {}, {} expanded",
                path.len(),
                path.cost(),
                self.ctx.expanded()
            );
        }
        self.ctx.reset();
        result
    }

    fn search(
        &mut self,
        grid: &Grid,
        start: NodeId,
        goal: NodeId,
        estimate: impl Fn(NodeId) -> i32,
    ) -> Result<Path, PathError> {
        let ctx = &mut self.ctx;

        ctx.update(start, 0, estimate(start), None);
        let mut current = start;
        let mut first = true;

        loop {
            // The start node is processed before anything is ever opened.
            if !first {
                match ctx.pop_open() {
                    Some(id) => current = id,
                    None => break,
                }
            }
            first = false;

            if current == goal {
                break;
            }
            if let Some(max) = self.config.max_expansions {
                if ctx.expanded() >= max {
                    return Err(PathError::BudgetExhausted {
                        expanded: ctx.expanded(),
                    });
                }
            }
            ctx.count_expansion();

            let neighbors = grid.all_neighbors(current);
            let passable = |j: usize| neighbors[j].is_some_and(|n| grid.is_clear(n));
            let current_g = ctx.state(current).g();

            for (i, dir) in Direction::CLOCKWISE.into_iter().enumerate() {
                let Some(n) = neighbors[i] else {
                    continue;
                };
                if !grid.is_clear(n) {
                    continue;
                }
                // No corner cutting: both flanking orthogonals must be clear.
                if dir.is_diagonal() && !(passable((i + 7) % 8) && passable((i + 1) % 8)) {
                    continue;
                }

                let g = current_g + dir.step_cost();
                let recorded = ctx.state(n).g();
                match ctx.membership(n) {
                    Membership::Closed => {
                        // Improved closed nodes keep their place in the closed set.
                        if g < recorded {
                            ctx.update(n, g, estimate(n), Some(current));
                        }
                    }
                    Membership::Open { .. } if recorded <= g => {}
                    _ => {
                        ctx.update(n, g, estimate(n), Some(current));
                        ctx.push_open(n);
                    }
                }
            }

            ctx.close(current);
        }

        if current != goal {
            return Err(PathError::Unreachable);
        }

        let mut nodes = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            nodes.push(id);
            cursor = ctx.state(id).parent();
        }
        nodes.reverse();
        // Descendants of an improved closed node keep a stale g.
        let cost = nodes.windows(2).map(|w| step_cost(grid, w[0], w[1])).sum();
        Ok(Path::new(nodes, cost))
    }
}

/// Cost of the single step between two adjacent nodes.
fn step_cost(grid: &Grid, a: NodeId, b: NodeId) -> i32 {
    match (grid.coord(a), grid.coord(b)) {
        (Some(a), Some(b)) if a.delta(b) == (1, 1) => DIAGONAL_COST,
        _ => ORTHOGONAL_COST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(grid: &Grid, path: &Path) -> Vec<(i32, i32)> {
        path.coords(grid).iter().map(|c| (c.row, c.col)).collect()
    }

    fn blocked(rows: i32, cols: i32, walls: &[(i32, i32)]) -> Grid {
        Grid::from_fn(rows, cols, |c| walls.contains(&(c.row, c.col))).unwrap()
    }

    #[test]
    fn diagonal_on_open_grid() {
        let g = Grid::new(3, 3).unwrap();
        let mut pf = PathFinder::new();
        let p = pf.find_path(&g, Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(coords(&g, &p), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(p.cost(), 28);
    }

    #[test]
    fn start_equals_goal() {
        let g = Grid::new(3, 3).unwrap();
        let mut pf = PathFinder::new();
        let p = pf.find_path(&g, Coord::new(1, 2), Coord::new(1, 2));
        assert!(p.is_trivial());
        assert_eq!(p.nodes(), &[g.node_at(Coord::new(1, 2)).unwrap()]);
        assert_eq!(p.cost(), 0);
        assert!(pf.context().is_clean());
    }

    #[test]
    fn occupied_goal_rejected() {
        let g = blocked(3, 3, &[(2, 2)]);
        let mut pf = PathFinder::new();
        assert_eq!(
            pf.try_find_path(&g, Coord::new(0, 0), Coord::new(2, 2)),
            Err(PathError::GoalOccupied(Coord::new(2, 2)))
        );
        // Even when it is also the start.
        assert!(pf.find_path(&g, Coord::new(2, 2), Coord::new(2, 2)).is_empty());
    }

    #[test]
    fn occupied_start_allowed() {
        let g = blocked(1, 3, &[(0, 0)]);
        let p = PathFinder::new().find_path(&g, Coord::new(0, 0), Coord::new(0, 2));
        assert_eq!(coords(&g, &p), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let g = Grid::new(2, 2).unwrap();
        let mut pf = PathFinder::new();
        assert_eq!(
            pf.try_find_path(&g, Coord::new(-1, 0), Coord::new(1, 1)),
            Err(PathError::OutOfBounds(Coord::new(-1, 0)))
        );
        assert_eq!(
            pf.try_find_path(&g, Coord::new(0, 0), Coord::new(2, 0)),
            Err(PathError::OutOfBounds(Coord::new(2, 0)))
        );
    }

    #[test]
    fn no_corner_cutting() {
        // Blocking (0,1) forbids the (0,0) -> (1,1) diagonal.
        let g = blocked(3, 3, &[(0, 1)]);
        let p = PathFinder::new().find_path(&g, Coord::new(0, 0), Coord::new(1, 1));
        assert_eq!(coords(&g, &p), vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(p.cost(), 20);
    }

    #[test]
    fn boxed_in_by_corners() {
        let g = blocked(3, 3, &[(0, 1), (1, 0)]);
        let mut pf = PathFinder::new();
        assert_eq!(
            pf.try_find_path(&g, Coord::new(0, 0), Coord::new(1, 1)),
            Err(PathError::Unreachable)
        );
        assert!(pf.context().is_clean());
    }

    #[test]
    fn single_row_blocked() {
        let g = blocked(1, 5, &[(0, 2)]);
        let p = PathFinder::new().find_path(&g, Coord::new(0, 0), Coord::new(0, 4));
        assert!(p.is_empty());
    }

    #[test]
    fn equal_cost_ties_resolve_fifo() {
        // Both detours around the centre cost 40; the eastern neighbour of
        // the start is opened first, so the northern route wins.
        let g = blocked(3, 3, &[(1, 1)]);
        let p = PathFinder::new().find_path(&g, Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(coords(&g, &p), vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]);
        assert_eq!(p.cost(), 40);
    }

    #[test]
    fn budget_exhausted() {
        let g = Grid::new(10, 10).unwrap();
        let mut pf = PathFinder::with_config(SearchConfig::with_max_expansions(3));
        assert_eq!(
            pf.try_find_path(&g, Coord::new(0, 0), Coord::new(9, 9)),
            Err(PathError::BudgetExhausted { expanded: 3 })
        );
        assert!(pf.context().is_clean());

        pf.set_config(SearchConfig::default());
        let p = pf.find_path(&g, Coord::new(0, 0), Coord::new(9, 9));
        assert_eq!(p.len(), 10);
        assert_eq!(p.cost(), 126);
    }

    #[test]
    fn improved_closed_node_keeps_place_and_takes_new_parent() {
        // A ring around a 2x2 block with a pocket (3,4) reachable only from
        // (3,3). The estimate lures the search round the long southern arc
        // first, so (3,3) is closed at g=70 before the northern arc reaches
        // it at g=50.
        let g = blocked(
            4,
            5,
            &[(1, 1), (1, 2), (2, 1), (2, 2), (0, 4), (1, 4), (2, 4)],
        );
        let at = |r, c| g.node_at(Coord::new(r, c)).unwrap();
        let north = [(0, 2), (0, 3), (1, 3), (2, 3)];
        let estimate = |id: NodeId| {
            let c = g.coord(id).unwrap();
            if (c.row, c.col) == (3, 4) {
                1000
            } else if north.contains(&(c.row, c.col)) {
                100
            } else {
                0
            }
        };

        let mut pf = PathFinder::new();
        pf.ctx.prepare(g.len());
        let p = pf.search(&g, at(0, 1), at(3, 4), estimate).unwrap();

        let corner = pf.ctx.state(at(3, 3));
        assert_eq!(pf.ctx.membership(at(3, 3)), Membership::Closed);
        assert_eq!(corner.g(), 50);
        assert_eq!(corner.parent(), Some(at(2, 3)));
        // The pocket still carries the g it was opened with.
        assert_eq!(pf.ctx.state(at(3, 4)).g(), 80);

        assert_eq!(
            coords(&g, &p),
            vec![(0, 1), (0, 2), (0, 3), (1, 3), (2, 3), (3, 3), (3, 4)]
        );
        let steps: i32 = p
            .nodes()
            .windows(2)
            .map(|w| step_cost(&g, w[0], w[1]))
            .sum();
        assert_eq!(p.cost(), steps);
        assert_eq!(p.cost(), 60);

        pf.ctx.reset();
        assert!(pf.context().is_clean());
    }

    #[test]
    fn context_clean_after_every_outcome() {
        let g = blocked(5, 5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
        let mut pf = PathFinder::new();
        pf.find_path(&g, Coord::new(0, 0), Coord::new(4, 1));
        assert!(pf.context().is_clean());
        pf.find_path(&g, Coord::new(0, 0), Coord::new(4, 4));
        assert!(pf.context().is_clean());
    }
}
