//! Pac-Man entity implementation.
//!
//! The player buffers the last requested direction and only commits to it at a turning point
//! (or on the very first move), so a turn pressed slightly early still lands.

use bevy_ecs::component::Component;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::constants::{PLAYER_INITIAL_DIRECTION, PLAYER_SPAWN};
use crate::entity::body::{Body, Openings};
use crate::map::direction::Direction;
use crate::map::grid::{tile_center, WallMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Alive,
    Dying,
}

/// How the player should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAnimation {
    /// Has not moved yet.
    Idle,
    Moving(Direction),
    /// Pressed against a wall.
    Stopped(Direction),
    Dying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    DirectionChanged(Direction),
    /// Ran into a wall.
    Stopped,
    Died { lives_remaining: u8 },
}

pub type PlayerEvents = SmallVec<[PlayerEvent; 2]>;

/// The player-controlled agent.
#[derive(Component, Debug)]
pub struct Pacman {
    direction: Option<Direction>,
    next_direction: Option<Direction>,
    first_move: bool,
    lives: u8,
    state: PlayerState,
    marker: IVec2,
    spawn: Vec2,
    config: EngineConfig,
}

impl Pacman {
    pub fn new(spawn: Vec2, config: &EngineConfig) -> Self {
        Self {
            direction: None,
            next_direction: None,
            first_move: true,
            lives: config.starting_lives,
            state: PlayerState::Alive,
            marker: Body::new(spawn).marker(config.tile_size),
            spawn,
            config: *config,
        }
    }

    /// A player at the usual spawn point, already asked to head off in its usual direction.
    pub fn standard(config: &EngineConfig) -> Self {
        let mut pacman = Self::new(PLAYER_SPAWN * config.tile_size, config);
        pacman.set_next_direction(PLAYER_INITIAL_DIRECTION);
        pacman
    }

    pub fn spawn_body(&self) -> Body {
        Body::new(self.spawn)
    }

    /// Buffers a requested direction. It replaces any earlier request and waits until it is legal.
    pub fn set_next_direction(&mut self, direction: Direction) {
        self.next_direction = Some(direction);
    }

    /// The last committed direction.
    pub fn facing(&self) -> Option<Direction> {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == PlayerState::Alive
    }

    pub fn marker(&self) -> IVec2 {
        self.marker
    }

    pub fn animation(&self, body: &Body) -> PlayerAnimation {
        match (self.state, self.direction) {
            (PlayerState::Dying, _) => PlayerAnimation::Dying,
            (PlayerState::Alive, None) => PlayerAnimation::Idle,
            (PlayerState::Alive, Some(direction)) if body.is_moving() => PlayerAnimation::Moving(direction),
            (PlayerState::Alive, Some(direction)) => PlayerAnimation::Stopped(direction),
        }
    }

    /// Whether the player could commit to `direction` right now.
    pub fn can_change_direction(&self, direction: Direction, body: &Body, walls: &impl WallMap) -> bool {
        let tile_size = self.config.tile_size;
        let marker = body.marker(tile_size);
        if !Openings::around(marker, walls).allows(direction) {
            return false;
        }
        self.first_move || body.is_near(tile_center(marker, tile_size), self.config.player_turn_tolerance)
    }

    /// Runs one tick of the player's movement logic.
    pub fn update(&mut self, body: &mut Body, walls: &impl WallMap) -> PlayerEvents {
        let mut events = PlayerEvents::new();
        if self.state == PlayerState::Dying {
            return events;
        }

        let tile_size = self.config.tile_size;
        if body.wrap_horizontal(self.config.screen_width()) {
            trace!(x = body.position.x, "Player wrapped through the tunnel");
        }

        self.marker = body.marker(tile_size);
        let openings = Openings::around(self.marker, walls);
        let turning_point = tile_center(self.marker, tile_size);

        if let Some(direction) = self.direction {
            if body.is_moving() && !openings.allows(direction) && body.has_reached(turning_point, direction) {
                body.reset(turning_point);
                events.push(PlayerEvent::Stopped);
            }
        }

        let Some(next) = self.next_direction else {
            return events;
        };

        if self.direction == Some(next) && body.is_moving() {
            self.next_direction = None;
        } else if self.can_change_direction(next, body, walls) {
            body.position = turning_point;
            body.steer(next, self.config.player_speed);
            self.direction = Some(next);
            self.next_direction = None;
            self.first_move = false;
            events.push(PlayerEvent::DirectionChanged(next));
        }

        events
    }

    /// The player was caught by a ghost. Ignored while already dying.
    pub fn die(&mut self, body: &mut Body) -> Option<PlayerEvent> {
        if self.state == PlayerState::Dying {
            return None;
        }
        body.velocity = Vec2::ZERO;
        self.lives = self.lives.saturating_sub(1);
        self.state = PlayerState::Dying;
        self.next_direction = None;
        debug!(lives_remaining = self.lives, "Player died");
        Some(PlayerEvent::Died {
            lives_remaining: self.lives,
        })
    }

    /// Returns to the spawn point after a death, keeping the remaining lives.
    pub fn respawn(&mut self, body: &mut Body) {
        self.direction = None;
        self.next_direction = Some(PLAYER_INITIAL_DIRECTION);
        self.first_move = true;
        self.state = PlayerState::Alive;
        body.reset(self.spawn);
        self.marker = body.marker(self.config.tile_size);
    }

    /// Restores the level-start state, lives included.
    pub fn reset(&mut self, body: &mut Body) {
        self.respawn(body);
        self.lives = self.config.starting_lives;
    }
}
