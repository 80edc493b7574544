//! The decision core: agent bodies, ghost and player state machines, and chase strategies.
//!
//! Nothing in here knows about the ECS schedule; the systems in [`crate::systems`] feed these
//! types the current tick and the board and forward whatever events they return.

pub mod body;
pub mod ghost;
pub mod mode;
pub mod pacman;
pub mod strategy;
