//! The Entity-Component-System (ECS) host.
//!
//! This module wires the decision core into a `bevy_ecs` schedule: components and resources,
//! the per-tick update systems, velocity integration, collisions and pellets.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod item;
pub mod movement;
pub mod player;
pub mod state;

pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::state::*;
