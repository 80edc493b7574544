//! This module contains all the constants used by the engine.

use std::time::Duration;

use glam::{IVec2, UVec2, Vec2};

use crate::map::direction::Direction;

/// A count of discrete engine ticks.
pub type Ticks = u64;

/// Number of engine ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The size of each tile, in world units.
pub const TILE_SIZE: f32 = 12.0;
/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 36);

/// How long ghosts spend scattering before switching to chase.
pub const SCATTER_DURATION: Duration = Duration::from_secs(7);
/// How long ghosts spend chasing before switching back to scatter.
pub const CHASE_DURATION: Duration = Duration::from_secs(20);
/// How long a power pellet keeps ghosts frightened.
pub const FRIGHTEN_DURATION: Duration = Duration::from_secs(7);
/// Minimum time between two turn decisions of the same ghost.
pub const TURN_COOLDOWN: Duration = Duration::from_millis(300);
/// How long agents stay frozen after the player dies.
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

/// Ghost baseline speed, in world units per second.
pub const GHOST_SPEED: f32 = 50.0;
/// Player speed, in world units per second.
pub const PLAYER_SPEED: f32 = 85.0;
pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.5;
pub const EATEN_SPEED_FACTOR: f32 = 3.0;

/// Maximum pixel distance from a turning point at which a ghost may turn.
pub const GHOST_TURN_TOLERANCE: f32 = 2.0;
/// Maximum pixel distance from a turning point at which the player may turn.
pub const PLAYER_TURN_TOLERANCE: f32 = 1.5;

/// How far ahead of the player the ambushing ghost aims, in tiles.
pub const AMBUSH_LEAD_TILES: f32 = 4.0;
/// How far ahead of the player the flanking ghost's pivot sits, in tiles.
pub const FLANK_LEAD_TILES: f32 = 2.0;
/// Beyond this distance (in tiles) the ambivalent ghost chases; within it, it retreats.
pub const AMBIVALENT_RADIUS_TILES: f32 = 8.0;

/// The two tiles inside the pen that force ghosts upward, out through the door.
pub const GATE_TILES: [IVec2; 2] = [IVec2::new(13, 16), IVec2::new(14, 16)];
/// The tile an eaten ghost must reach to respawn.
pub const HOME_TILE: IVec2 = IVec2::new(13, 16);
/// Inclusive corners of the pen interior, below the door.
pub const HOUSE_AREA: [IVec2; 2] = [IVec2::new(11, 16), IVec2::new(16, 18)];

pub const STARTING_LIVES: u8 = 3;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;

/// Player spawn point, in tile units.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(14.0, 26.5);
pub const PLAYER_INITIAL_DIRECTION: Direction = Direction::Left;

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile.
    Empty,
    /// A wall tile.
    Wall,
    /// The pen door; blocks the player, ghosts may pass when leaving the pen or returning home.
    Door,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// A tunnel tile.
    Tunnel,
}

/// The raw layout of the game board, as a 2D array of characters.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "                            ",
    "                            ",
    "                            ",
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "T     .   #      #   .     T",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
    "                            ",
    "                            ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        for row in RAW_BOARD.iter() {
            assert_eq!(row.len(), BOARD_CELL_SIZE.x as usize);
        }
    }

    #[test]
    fn test_raw_board_tunnel_row() {
        let tunnel_row = RAW_BOARD[17];
        assert_eq!(tunnel_row.chars().next().unwrap(), 'T');
        assert_eq!(tunnel_row.chars().last().unwrap(), 'T');
    }

    #[test]
    fn test_raw_board_power_pellets() {
        let count: usize = RAW_BOARD.iter().map(|row| row.chars().filter(|&c| c == 'o').count()).sum();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_gate_tiles_sit_below_door() {
        for gate in GATE_TILES {
            let door_row = RAW_BOARD[(gate.y - 1) as usize];
            assert_eq!(door_row.chars().nth(gate.x as usize), Some('='));
            let gate_row = RAW_BOARD[gate.y as usize];
            assert_eq!(gate_row.chars().nth(gate.x as usize), Some(' '));
        }
    }

    #[test]
    fn test_home_tile_is_a_gate() {
        assert!(GATE_TILES.contains(&HOME_TILE));
    }
}
