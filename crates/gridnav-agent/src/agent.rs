use std::collections::VecDeque;

use gridnav_core::{Coord, Grid, NodeId, Vec3};
use gridnav_paths::PathFinder;
use rand::Rng;

/// Agent behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AgentConfig {
    /// Mark the agent's own cell occupied, freeing it again on departure.
    pub claims_cells: bool,
}

/// Result of asking an agent to walk somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The destination is off the grid or occupied.
    Rejected,
    /// No route exists.
    NoPath,
    /// The agent is (or will be, once its queue drains) already there.
    AlreadyThere,
    /// This many cells were appended to the pending queue.
    Queued(usize),
}

/// A grid walker: a current cell plus a queue of cells still to visit.
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    position: NodeId,
    pending: VecDeque<NodeId>,
    config: AgentConfig,
    /// The cell this agent marked occupied, if any.
    claimed: Option<NodeId>,
}

impl Agent {
    pub fn new(name: impl Into<String>, position: NodeId) -> Self {
        Self::with_config(name, position, AgentConfig::default())
    }

    pub fn with_config(name: impl Into<String>, position: NodeId, config: AgentConfig) -> Self {
        Self {
            name: name.into(),
            position,
            pending: VecDeque::new(),
            config,
            claimed: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cell the agent currently stands on (or is walking into).
    #[inline]
    pub fn position(&self) -> NodeId {
        self.position
    }

    /// Cells still to visit, in order.
    pub fn pending(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.pending.iter().copied()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Where the agent ends up once its queue drains.
    pub fn destination(&self) -> NodeId {
        self.pending.back().copied().unwrap_or(self.position)
    }

    /// The cell this agent holds occupied. Always `None` unless
    /// [`AgentConfig::claims_cells`] is set.
    #[inline]
    pub fn claimed(&self) -> Option<NodeId> {
        self.claimed
    }

    /// Put the agent on `id`, dropping any queued walk. Claims the cell when
    /// configured to and the cell is clear.
    pub fn place(&mut self, grid: &mut Grid, id: NodeId) {
        self.move_claim(grid, id);
        self.position = id;
        self.pending.clear();
    }

    /// Release the previous claim and take `id` if it is free. Cells the
    /// agent never claimed are left alone.
    fn move_claim(&mut self, grid: &mut Grid, id: NodeId) {
        if !self.config.claims_cells || self.claimed == Some(id) {
            return;
        }
        if let Some(old) = self.claimed.take() {
            grid.set_clear(old);
        }
        if grid.is_clear(id) {
            grid.set_occupied(id);
            self.claimed = Some(id);
        }
    }

    /// Drop every queued cell. The agent stays where it is.
    pub fn stop(&mut self) {
        self.pending.clear();
    }

    /// Plan a route to `destination` and queue it behind any walk already in
    /// progress.
    pub fn walk_to(
        &mut self,
        grid: &Grid,
        finder: &mut PathFinder,
        destination: Coord,
    ) -> WalkOutcome {
        let Some(goal) = grid.node_at(destination) else {
            return WalkOutcome::Rejected;
        };
        let from = self.destination();
        // Our own claim does not count against us.
        if goal == from && (grid.is_clear(goal) || self.claimed == Some(goal)) {
            log::debug!("{}: already at {destination}", self.name);
            return WalkOutcome::AlreadyThere;
        }
        if !grid.is_clear(goal) {
            return WalkOutcome::Rejected;
        }
        let Some(start) = grid.coord(from) else {
            log::warn!("{}: standing on unknown node {from}", self.name);
            return WalkOutcome::Rejected;
        };

        let path = finder.find_path(grid, start, destination);
        if path.is_empty() {
            log::info!("{}: no path from {start} to {destination}", self.name);
            return WalkOutcome::NoPath;
        }
        if path.is_trivial() {
            log::debug!("{}: already at {destination}", self.name);
            return WalkOutcome::AlreadyThere;
        }
        // The first node is where the agent already is.
        let steps = &path.nodes()[1..];
        self.pending.extend(steps.iter().copied());
        log::debug!(
            "{}: queued {} cells to {destination} (cost {})",
            self.name,
            steps.len(),
            path.cost()
        );
        WalkOutcome::Queued(steps.len())
    }

    /// Advance to the next queued cell and return its world position.
    ///
    /// If the cell became occupied since it was planned the whole queue is
    /// dropped and `None` returned; the caller should plan again.
    pub fn next_waypoint(&mut self, grid: &mut Grid) -> Option<Vec3> {
        let next = *self.pending.front()?;
        if !grid.is_clear(next) {
            log::warn!(
                "{}: next cell {} is blocked, dropping {} queued cells",
                self.name,
                grid.coord(next).map_or_else(|| next.to_string(), |c| c.to_string()),
                self.pending.len()
            );
            self.pending.clear();
            return None;
        }
        self.pending.pop_front();
        self.move_claim(grid, next);
        self.position = next;
        grid.world_position(next)
    }

    /// Pick random destinations until one yields a real walk, giving up
    /// after `attempts` tries. A failed wander leaves the agent idle.
    pub fn wander(
        &mut self,
        grid: &Grid,
        finder: &mut PathFinder,
        rng: &mut impl Rng,
        attempts: usize,
    ) -> WalkOutcome {
        for _ in 0..attempts {
            let goal = Coord::new(
                rng.random_range(0..grid.rows()),
                rng.random_range(0..grid.cols()),
            );
            if let outcome @ WalkOutcome::Queued(_) = self.walk_to(grid, finder, goal) {
                return outcome;
            }
        }
        log::debug!("{}: nowhere to wander after {attempts} attempts", self.name);
        WalkOutcome::NoPath
    }
}
