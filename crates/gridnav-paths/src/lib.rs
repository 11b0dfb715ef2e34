//! A\* pathfinding over a [`gridnav_core::Grid`].
//!
//! [`PathFinder`] runs an 8-way A\* search with octile costs (10 orthogonal,
//! 14 diagonal) and refuses to cut corners past blocked cells. Its scratch
//! state lives in a [`SearchContext`] outside the grid, so the grid is only
//! ever borrowed immutably during a search.
//!
//! ```
//! use gridnav_core::{Coord, Grid};
//! use gridnav_paths::FindPath;
//!
//! let grid = Grid::new(3, 3).unwrap();
//! let path = grid.find_path(Coord::new(0, 0), Coord::new(2, 2));
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.cost(), 28);
//! ```

mod astar;
mod config;
mod context;
mod path;
mod traits;

pub use astar::{PathError, PathFinder};
pub use config::SearchConfig;
pub use context::{Membership, SearchContext, SearchState};
pub use path::Path;
pub use traits::FindPath;
