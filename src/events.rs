use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::entity::ghost::{GhostEvent, GhostType};
use crate::entity::mode::GhostMode;
use crate::entity::pacman::PlayerEvent;
use crate::map::direction::Direction;

/// Intents the host forwards to the engine, usually from raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    ResetLevel,
    TogglePause,
}

/// Notifications emitted by the engine during a tick.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player committed to a new heading.
    PlayerDirectionChanged(Direction),
    /// The player ran into a wall and stopped.
    PlayerStopped,
    /// The player was captured by a ghost.
    PlayerDied { lives_remaining: u8 },
    /// Agents were returned to their spawn points after a death.
    PlayerRespawned,
    /// The player has no lives left.
    GameOver,
    GhostDirectionChanged { ghost: GhostType, direction: Direction },
    GhostModeChanged { ghost: GhostType, from: GhostMode, to: GhostMode },
    /// The player captured a frightened ghost.
    GhostEaten(GhostType),
    /// An eaten ghost made it back home.
    GhostRespawned(GhostType),
    PelletEaten { tile: IVec2 },
    PowerPelletEaten { tile: IVec2 },
    /// Every pellet on the board has been eaten.
    LevelCleared,
}

impl From<PlayerEvent> for GameEvent {
    fn from(event: PlayerEvent) -> Self {
        match event {
            PlayerEvent::DirectionChanged(direction) => GameEvent::PlayerDirectionChanged(direction),
            PlayerEvent::Stopped => GameEvent::PlayerStopped,
            PlayerEvent::Died { lives_remaining } => GameEvent::PlayerDied { lives_remaining },
        }
    }
}

impl GameEvent {
    /// Tags a ghost's own event with the ghost it came from.
    pub fn from_ghost(ghost: GhostType, event: GhostEvent) -> Self {
        match event {
            GhostEvent::DirectionChanged(direction) => GameEvent::GhostDirectionChanged { ghost, direction },
            GhostEvent::ModeChanged(change) => GameEvent::GhostModeChanged {
                ghost,
                from: change.from,
                to: change.to,
            },
            GhostEvent::Respawned => GameEvent::GhostRespawned(ghost),
        }
    }
}
