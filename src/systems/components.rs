use bevy_ecs::{component::Component, resource::Resource};
use rand::rngs::SmallRng;

use crate::constants::Ticks;

/// A circular hitbox around an agent's position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    /// Checks if this collider overlaps another collider of `other_radius` at `distance`.
    pub fn collides_with(&self, other_radius: f32, distance: f32) -> bool {
        distance < self.radius + other_radius
    }
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    pub paused: bool,
    /// The player ran out of lives; agents stay frozen until the level is reset.
    pub game_over: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

/// Seconds elapsed since the previous tick.
#[derive(Resource, Debug, Default)]
pub struct DeltaTime(pub f32);

/// Number of ticks run so far. Every deadline in the engine is expressed against this counter.
#[derive(Resource, Debug, Default)]
pub struct TickCounter(pub Ticks);

/// Source of randomness for frightened ghosts.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);

/// Tick at which agents return to their spawn points after a death. Agents are frozen while set.
#[derive(Resource, Debug, Default)]
pub struct RestartTimer(pub Option<Ticks>);
