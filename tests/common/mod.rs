#![allow(dead_code)]

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};
use pacman_core::config::EngineConfig;
use pacman_core::constants::Ticks;
use pacman_core::entity::body::Body;
use pacman_core::entity::ghost::{Ghost, GhostContext, GhostSpawn, GhostType};
use pacman_core::entity::pacman::Pacman;
use pacman_core::error::GameError;
use pacman_core::events::GameEvent;
use pacman_core::map::direction::Direction;
use pacman_core::map::grid::{tile_center, TileGrid, WallMap};
use pacman_core::systems::{Collider, DeltaTime, GameRng, GlobalState, RestartTimer, ScoreResource, TickCounter};
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const TILE: f32 = 12.0;

/// A hand-drawn wall map: `#` is a wall, `=` a door, anything else is open. Everything outside
/// the drawing is solid.
pub struct AsciiMap {
    rows: Vec<Vec<char>>,
}

impl AsciiMap {
    pub fn new(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|row| row.chars().collect()).collect(),
        }
    }

    fn at(&self, tile: IVec2) -> char {
        if tile.x < 0 || tile.y < 0 {
            return '#';
        }
        self.rows
            .get(tile.y as usize)
            .and_then(|row| row.get(tile.x as usize))
            .copied()
            .unwrap_or('#')
    }
}

impl WallMap for AsciiMap {
    fn is_wall(&self, tile: IVec2) -> bool {
        matches!(self.at(tile), '#' | '=')
    }

    fn is_door(&self, tile: IVec2) -> bool {
        self.at(tile) == '='
    }
}

/// An open field: every tile is walkable.
pub fn open_field() -> AsciiMap {
    AsciiMap::new(&["          "; 10])
}

pub fn config() -> EngineConfig {
    EngineConfig::default()
}

pub fn center(x: i32, y: i32) -> Vec2 {
    tile_center(IVec2::new(x, y), TILE)
}

pub fn rng() -> SmallRng {
    SmallRng::seed_from_u64(0x5eed)
}

pub fn context(tick: Ticks, player_position: Vec2) -> GhostContext {
    GhostContext {
        tick,
        player_position,
        player_facing: None,
        partner_position: None,
    }
}

/// A ghost of the given archetype spawned on a tile center, heading `direction`.
pub fn ghost_at(ghost_type: GhostType, tile: IVec2, direction: Direction, config: &EngineConfig) -> (Ghost, Body) {
    let spawn = GhostSpawn {
        position: tile_center(tile, config.tile_size),
        direction,
        scatter_anchor: ghost_type.scatter_anchor(),
    };
    let ghost = Ghost::new(ghost_type, spawn, ghost_type.strategy(config), config);
    let body = ghost.spawn_body();
    (ghost, body)
}

/// Runs a ghost's first update, which only launches it in its spawn direction.
pub fn launch(ghost: &mut Ghost, body: &mut Body, walls: &impl WallMap, tick: Ticks) {
    let player = Vec2::new(-1000.0, -1000.0);
    ghost.update(body, walls, &context(tick, player), &mut rng());
}

pub fn pacman_at(tile: IVec2, config: &EngineConfig) -> (Pacman, Body) {
    let pacman = Pacman::new(tile_center(tile, config.tile_size), config);
    let body = pacman.spawn_body();
    (pacman, body)
}

/// A world holding every resource the systems read, with the standard board.
pub fn create_test_world() -> World {
    let config = config();
    let mut world = World::default();
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<GameError>(&mut world);
    world.insert_resource(TileGrid::new(&pacman_core::constants::RAW_BOARD).unwrap());
    world.insert_resource(config);
    world.insert_resource(GlobalState::default());
    world.insert_resource(ScoreResource(0));
    world.insert_resource(DeltaTime(1.0 / 60.0));
    world.insert_resource(TickCounter(1));
    world.insert_resource(RestartTimer(None));
    world.insert_resource(GameRng(rng()));
    world
}

pub fn spawn_pacman(world: &mut World, position: Vec2) -> bevy_ecs::entity::Entity {
    let config = config();
    let pacman = Pacman::new(position, &config);
    world
        .spawn((pacman.spawn_body(), pacman, Collider { radius: TILE / 2.0 }))
        .id()
}

pub fn spawn_ghost(world: &mut World, ghost_type: GhostType, position: Vec2) -> bevy_ecs::entity::Entity {
    let config = config();
    let spawn = GhostSpawn {
        position,
        direction: Direction::Left,
        scatter_anchor: ghost_type.scatter_anchor(),
    };
    let ghost = Ghost::new(ghost_type, spawn, ghost_type.strategy(&config), &config);
    world
        .spawn((ghost.spawn_body(), ghost, Collider { radius: TILE / 2.0 }))
        .id()
}

pub fn drain_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}
