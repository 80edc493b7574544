use pacman_core::config::EngineConfig;
use pacman_core::entity::ghost::GhostType;
use pacman_core::entity::mode::GhostMode;
use pacman_core::error::GameError;
use pacman_core::events::{GameCommand, GameEvent};
use pacman_core::game::Game;
use pacman_core::map::direction::Direction;
use pacman_core::map::grid::{marker_of, TileGrid, WallMap};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

const DT: f32 = 1.0 / 60.0;
const GHOSTS: [GhostType; 4] = [GhostType::Red, GhostType::Pink, GhostType::Blue, GhostType::Orange];

fn game() -> Game {
    Game::with_seed(EngineConfig::default(), 7).expect("standard level should build")
}

#[test]
fn test_new_level_state() {
    let mut game = game();
    assert_eq!(game.pellets_remaining(), 244);
    assert_eq!(game.lives(), Some(3));
    assert_eq!(game.score(), 0);
    assert_eq!(game.tick_count(), 0);
    assert_that(&game.is_over()).is_false();
    for ghost_type in GHOSTS {
        assert_eq!(game.ghost_mode(ghost_type), Some(GhostMode::Scatter));
    }
}

#[test]
fn test_first_tick_launches_everyone() {
    let mut game = game();
    let events = game.tick(DT);

    assert_eq!(game.tick_count(), 1);
    assert_that(&events.contains(&GameEvent::PlayerDirectionChanged(Direction::Left))).is_true();
    let launched = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GhostDirectionChanged { .. }))
        .count();
    assert_that(&launched).is_greater_than_or_equal_to(4);
}

#[test]
fn test_pause_freezes_the_simulation() {
    let mut game = game();
    game.tick(DT);
    let before = game.player_body().unwrap();

    game.apply_command(GameCommand::TogglePause).unwrap();
    assert_that(&game.is_paused()).is_true();
    for _ in 0..5 {
        assert_that(&game.tick(DT)).is_empty();
    }
    assert_eq!(game.tick_count(), 1);
    assert_eq!(game.player_body().unwrap().position, before.position);

    game.apply_command(GameCommand::TogglePause).unwrap();
    game.tick(DT);
    assert_eq!(game.tick_count(), 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        tile_size: 0.0,
        ..Default::default()
    };
    let result = Game::with_seed(config, 1);
    assert_that(&matches!(result.err(), Some(GameError::Config(_)))).is_true();
}

#[test]
fn test_exit_command() {
    let mut game = game();
    game.apply_command(GameCommand::Exit).unwrap();
    assert_that(&game.should_exit()).is_true();
    assert_that(&game.tick(DT)).is_empty();
}

#[test]
fn test_player_eats_pellets_along_corridor() {
    let mut game = game();
    let mut events = Vec::new();
    for _ in 0..60 {
        events.extend(game.tick(DT));
    }

    assert_that(&game.score()).is_greater_than(0);
    assert_eq!(game.score() % 10, 0);
    assert_that(&game.pellets_remaining()).is_less_than(244);
    assert_that(&events.iter().any(|e| matches!(e, GameEvent::PelletEaten { .. }))).is_true();
}

#[test]
fn test_reset_level_restores_board() {
    let mut game = game();
    for _ in 0..60 {
        game.tick(DT);
    }
    game.apply_command(GameCommand::MovePlayer(Direction::Right)).unwrap();

    game.apply_command(GameCommand::ResetLevel).unwrap();

    assert_eq!(game.pellets_remaining(), 244);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lives(), Some(3));
    assert_eq!(game.tick_count(), 60);
    assert_eq!(game.ghost_body(GhostType::Red).map(|b| b.velocity), Some(glam::Vec2::ZERO));
}

#[test]
fn test_every_ghost_leaves_the_pen_and_stays_off_walls() {
    let config = EngineConfig::default();
    let door_row = config.gate_tiles[0].y - 1;
    // One full scatter and chase cycle, plus the start of the next scatter.
    let ticks = config.ticks(config.scatter_duration) + config.ticks(config.chase_duration) + 60;

    for seed in 0..3 {
        let mut game = Game::with_seed(config, seed).unwrap();
        let mut highest_row = [i32::MAX; 4];

        for _ in 0..ticks {
            game.tick(DT);
            for (i, ghost_type) in GHOSTS.into_iter().enumerate() {
                let body = game.ghost_body(ghost_type).unwrap();
                let marker = marker_of(body.position, config.tile_size);
                let grid = game.world.resource::<TileGrid>();
                assert!(
                    !grid.is_wall(marker) || grid.is_door(marker),
                    "{:?} entered wall tile {} (seed {})",
                    ghost_type,
                    marker,
                    seed
                );
                highest_row[i] = highest_row[i].min(marker.y);
            }
        }

        for (ghost_type, row) in GHOSTS.into_iter().zip(highest_row) {
            assert!(row < door_row, "{:?} never left the pen (seed {})", ghost_type, seed);
        }
    }
}
