use gridnav_core::{Grid, Vec3};

use crate::agent::Agent;

/// What a [`Locomotion::update`] tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Nothing queued.
    Idle,
    /// Still travelling.
    Moving,
    /// Reached the last queued waypoint this tick.
    Arrived,
    /// The next queued cell turned out to be occupied; the agent dropped its
    /// queue and stands on its last reached cell.
    Blocked,
}

/// Moves a world-space position along an [`Agent`]'s queued cells at a
/// constant speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Locomotion {
    position: Vec3,
    target: Option<Vec3>,
    speed: f32,
}

impl Locomotion {
    /// `speed` is in world units per second.
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            target: None,
            speed: speed.max(0.0),
        }
    }

    /// Start at the world position of the agent's current cell.
    pub fn for_agent(agent: &Agent, grid: &Grid, speed: f32) -> Self {
        let position = grid.world_position(agent.position()).unwrap_or(Vec3::ZERO);
        Self::new(position, speed)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Unit vector toward the current target, if moving.
    pub fn heading(&self) -> Option<Vec3> {
        self.target
            .and_then(|t| (t - self.position).try_normalize())
    }

    /// Advance by `dt` seconds. Arriving at a waypoint snaps onto it and
    /// pulls the next one from the agent; leftover travel is dropped.
    pub fn update(&mut self, dt: f32, agent: &mut Agent, grid: &mut Grid) -> Motion {
        let target = match self.target {
            Some(t) => t,
            None => {
                let had_queue = !agent.is_idle();
                match agent.next_waypoint(grid) {
                    Some(t) => {
                        self.target = Some(t);
                        t
                    }
                    None if had_queue => return Motion::Blocked,
                    None => return Motion::Idle,
                }
            }
        };

        let to = target - self.position;
        let dist = to.length();
        let step = self.speed * dt.max(0.0);
        if step < dist {
            self.position += to * (step / dist);
            return Motion::Moving;
        }

        self.position = target;
        let had_queue = !agent.is_idle();
        self.target = agent.next_waypoint(grid);
        match (self.target, had_queue) {
            (Some(_), _) => Motion::Moving,
            (None, true) => Motion::Blocked,
            (None, false) => Motion::Arrived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnav_core::Coord;
    use gridnav_paths::PathFinder;

    use crate::agent::WalkOutcome;

    #[test]
    fn follows_queue_to_the_end() {
        let mut grid = Grid::new(1, 3).unwrap();
        let start = grid.node_at(Coord::new(0, 0)).unwrap();
        let mut agent = Agent::new("runner", start);
        let mut loco = Locomotion::for_agent(&agent, &grid, 10.0);
        assert_eq!(loco.position(), Vec3::new(-10.0, 0.0, 0.0));

        assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Idle);

        let mut pf = PathFinder::new();
        assert_eq!(
            agent.walk_to(&grid, &mut pf, Coord::new(0, 2)),
            WalkOutcome::Queued(2)
        );
        assert_eq!(loco.update(0.5, &mut agent, &mut grid), Motion::Moving);
        assert_eq!(loco.position(), Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(loco.heading(), Some(Vec3::X));

        // Reaches (0,1) and turns toward (0,2).
        assert_eq!(loco.update(0.5, &mut agent, &mut grid), Motion::Moving);
        assert_eq!(loco.position(), Vec3::ZERO);
        assert_eq!(loco.target(), Some(Vec3::new(10.0, 0.0, 0.0)));

        assert_eq!(loco.update(5.0, &mut agent, &mut grid), Motion::Arrived);
        assert_eq!(loco.position(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(agent.position(), grid.node_at(Coord::new(0, 2)).unwrap());
        assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Idle);
    }

    #[test]
    fn occupied_cell_ahead_blocks() {
        let mut grid = Grid::new(1, 4).unwrap();
        let mut agent = Agent::new("runner", grid.node_at(Coord::new(0, 0)).unwrap());
        let mut pf = PathFinder::new();
        assert_eq!(
            agent.walk_to(&grid, &mut pf, Coord::new(0, 3)),
            WalkOutcome::Queued(3)
        );
        let mut loco = Locomotion::for_agent(&agent, &grid, 10.0);
        let wall = grid.node_at(Coord::new(0, 2)).unwrap();
        grid.set_occupied(wall);

        // Reaching (0,1) finds (0,2) taken.
        assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Blocked);
        assert_eq!(loco.position(), Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(agent.position(), grid.node_at(Coord::new(0, 1)).unwrap());
        assert!(agent.is_idle());
        assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Idle);
    }

    #[test]
    fn blocked_before_first_step() {
        let mut grid = Grid::new(1, 2).unwrap();
        let mut agent = Agent::new("runner", grid.node_at(Coord::new(0, 0)).unwrap());
        let mut pf = PathFinder::new();
        agent.walk_to(&grid, &mut pf, Coord::new(0, 1));
        let mut loco = Locomotion::for_agent(&agent, &grid, 10.0);
        let ahead = grid.node_at(Coord::new(0, 1)).unwrap();
        grid.set_occupied(ahead);
        assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Blocked);
        assert_eq!(loco.position(), Vec3::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn zero_speed_never_arrives() {
        let mut grid = Grid::new(1, 2).unwrap();
        let mut agent = Agent::new("statue", grid.node_at(Coord::new(0, 0)).unwrap());
        let mut pf = PathFinder::new();
        agent.walk_to(&grid, &mut pf, Coord::new(0, 1));
        let mut loco = Locomotion::for_agent(&agent, &grid, 0.0);
        let origin = loco.position();
        for _ in 0..3 {
            assert_eq!(loco.update(1.0, &mut agent, &mut grid), Motion::Moving);
        }
        assert_eq!(loco.position(), origin);
    }
}
