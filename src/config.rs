//! Runtime tuning for the engine.
//!
//! Every field defaults to its counterpart in [`crate::constants`]; hosts override individual
//! values with struct update syntax and call [`EngineConfig::validate`] before building a level.

use std::time::Duration;

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2};

use crate::constants::{self, Ticks};
use crate::error::ConfigError;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Size of a tile, in world units.
    pub tile_size: f32,
    /// Board dimensions, in tiles.
    pub board_size: UVec2,
    pub ticks_per_second: u32,

    pub scatter_duration: Duration,
    pub chase_duration: Duration,
    pub frighten_duration: Duration,
    pub turn_cooldown: Duration,
    pub restart_delay: Duration,

    /// Ghost baseline speed, in world units per second.
    pub ghost_speed: f32,
    /// Player speed, in world units per second.
    pub player_speed: f32,
    pub frightened_speed_factor: f32,
    pub eaten_speed_factor: f32,

    pub ghost_turn_tolerance: f32,
    pub player_turn_tolerance: f32,

    pub ambush_lead_tiles: f32,
    pub flank_lead_tiles: f32,
    pub ambivalent_radius_tiles: f32,

    pub gate_tiles: [IVec2; 2],
    pub home_tile: IVec2,
    /// Inclusive corners of the pen interior. Ghosts inside it head for the door.
    pub house_area: [IVec2; 2],

    pub starting_lives: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: constants::TILE_SIZE,
            board_size: constants::BOARD_CELL_SIZE,
            ticks_per_second: constants::TICKS_PER_SECOND,
            scatter_duration: constants::SCATTER_DURATION,
            chase_duration: constants::CHASE_DURATION,
            frighten_duration: constants::FRIGHTEN_DURATION,
            turn_cooldown: constants::TURN_COOLDOWN,
            restart_delay: constants::RESTART_DELAY,
            ghost_speed: constants::GHOST_SPEED,
            player_speed: constants::PLAYER_SPEED,
            frightened_speed_factor: constants::FRIGHTENED_SPEED_FACTOR,
            eaten_speed_factor: constants::EATEN_SPEED_FACTOR,
            ghost_turn_tolerance: constants::GHOST_TURN_TOLERANCE,
            player_turn_tolerance: constants::PLAYER_TURN_TOLERANCE,
            ambush_lead_tiles: constants::AMBUSH_LEAD_TILES,
            flank_lead_tiles: constants::FLANK_LEAD_TILES,
            ambivalent_radius_tiles: constants::AMBIVALENT_RADIUS_TILES,
            gate_tiles: constants::GATE_TILES,
            home_tile: constants::HOME_TILE,
            house_area: constants::HOUSE_AREA,
            starting_lives: constants::STARTING_LIVES,
        }
    }
}

impl EngineConfig {
    /// Converts a duration into a whole number of ticks, rounding to the nearest tick.
    pub fn ticks(&self, duration: Duration) -> Ticks {
        (duration.as_secs_f64() * self.ticks_per_second as f64).round() as Ticks
    }

    /// Width of the playfield, in world units. The player wraps around at its edges.
    pub fn screen_width(&self) -> f32 {
        self.board_size.x as f32 * self.tile_size
    }

    pub fn is_gate(&self, tile: IVec2) -> bool {
        self.gate_tiles.contains(&tile)
    }

    /// Whether `tile` lies inside the pen.
    pub fn in_house(&self, tile: IVec2) -> bool {
        let [min, max] = self.house_area;
        tile.cmpge(min).all() && tile.cmple(max).all()
    }

    fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.board_size.x && (tile.y as u32) < self.board_size.y
    }

    /// Checks that the configuration describes a playable level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        for (what, value) in [
            ("ghosts", self.ghost_speed),
            ("the player", self.player_speed),
            ("frightened ghosts", self.ghost_speed * self.frightened_speed_factor),
            ("eaten ghosts", self.ghost_speed * self.eaten_speed_factor),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidSpeed { what, value });
            }
        }

        for (what, duration) in [
            ("scatter", self.scatter_duration),
            ("chase", self.chase_duration),
            ("frighten", self.frighten_duration),
        ] {
            if self.ticks(duration) == 0 {
                return Err(ConfigError::ZeroDuration(what));
            }
        }

        for (what, tile) in [
            ("Home", self.home_tile),
            ("Gate", self.gate_tiles[0]),
            ("Gate", self.gate_tiles[1]),
            ("House", self.house_area[0]),
            ("House", self.house_area[1]),
        ] {
            if !self.contains(tile) {
                return Err(ConfigError::TileOutOfBounds { what, tile });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_duration_to_ticks() {
        let config = EngineConfig::default();
        assert_eq!(config.ticks(Duration::from_secs(7)), 420);
        assert_eq!(config.ticks(Duration::from_millis(300)), 18);
    }

    #[test]
    fn test_screen_width() {
        assert_eq!(EngineConfig::default().screen_width(), 336.0);
    }

    #[test]
    fn test_in_house() {
        let config = EngineConfig::default();
        assert!(config.in_house(IVec2::new(11, 16)));
        assert!(config.in_house(IVec2::new(16, 18)));
        assert!(config.in_house(config.home_tile));
        assert!(!config.in_house(IVec2::new(13, 15)));
        assert!(!config.in_house(IVec2::new(10, 17)));
    }
}
