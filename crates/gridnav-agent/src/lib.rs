//! Agents that walk paths found by [`gridnav_paths::PathFinder`].
//!
//! An [`Agent`] keeps the cell it stands on and a queue of cells still to
//! visit. [`Locomotion`] turns that queue into smooth world-space motion.

mod agent;
mod locomotion;

pub use agent::{Agent, AgentConfig, WalkOutcome};
pub use locomotion::{Locomotion, Motion};
