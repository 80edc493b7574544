//! This module contains the level setup and the per-tick driver.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::config::EngineConfig;
use crate::constants::RAW_BOARD;
use crate::entity::body::Body;
use crate::entity::ghost::{Ghost, GhostAnimation, GhostType};
use crate::entity::mode::GhostMode;
use crate::entity::pacman::{Pacman, PlayerAnimation};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::map::grid::TileGrid;
use crate::systems::{
    agents_active, collision_system, ghost_system, is_running, item_system, movement_system, player_system, restart_system,
    tick_system, Collider, DeltaTime, GameRng, GlobalState, RestartTimer, ScoreResource, TickCounter,
};

/// The `Game` struct is the main entry point for the engine.
///
/// It owns the ECS world holding the board, the player and the ghosts, and the schedule that
/// advances them by one tick per call to [`Game::tick`].
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the standard level with an entropy-seeded random source.
    pub fn new(config: EngineConfig) -> GameResult<Game> {
        Self::with_rng(config, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Builds the standard level with a reproducible random source.
    pub fn with_seed(config: EngineConfig, seed: u64) -> GameResult<Game> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: SmallRng) -> GameResult<Game> {
        config.validate()?;

        let grid = TileGrid::new(&RAW_BOARD)?;
        if grid.size() != config.board_size {
            return Err(GameError::InvalidState(format!(
                "Board is {} tiles but the configuration expects {}",
                grid.size(),
                config.board_size
            )));
        }

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);

        world.insert_resource(grid);
        world.insert_resource(config);
        world.insert_resource(GlobalState::default());
        world.insert_resource(ScoreResource(0));
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(TickCounter(0));
        world.insert_resource(RestartTimer(None));
        world.insert_resource(GameRng(rng));

        let collider = Collider {
            radius: config.tile_size / 2.0,
        };

        let pacman = Pacman::standard(&config);
        world.spawn((pacman.spawn_body(), pacman, collider));

        for ghost_type in GhostType::iter() {
            let ghost = Ghost::standard(ghost_type, &config);
            world.spawn((ghost.spawn_body(), ghost, collider));
        }

        schedule.add_systems(
            (
                tick_system,
                (player_system, ghost_system, item_system, collision_system, movement_system)
                    .chain()
                    .run_if(agents_active),
                restart_system,
            )
                .chain()
                .run_if(is_running),
        );

        info!(size = %config.board_size, pellets = world.resource::<TileGrid>().pellets_remaining(), "Level built");

        Ok(Game { world, schedule })
    }

    /// Runs one tick, `dt` seconds after the previous one, and returns the events it produced.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        self.world.insert_resource(DeltaTime(dt));

        self.schedule.run(&mut self.world);

        for e in self.world.resource_mut::<Events<GameError>>().drain() {
            error!(error = %e, "Engine reported an error");
        }

        self.world.resource_mut::<Events<GameEvent>>().drain().collect()
    }

    /// Applies a host intent immediately.
    pub fn apply_command(&mut self, command: GameCommand) -> GameResult<()> {
        match command {
            GameCommand::MovePlayer(direction) => {
                let mut players = self.world.query::<&mut Pacman>();
                let mut pacman = players
                    .single_mut(&mut self.world)
                    .map_err(|e| GameError::InvalidState(format!("No/multiple player entities: {}", e)))?;
                pacman.set_next_direction(direction);
            }
            GameCommand::TogglePause => {
                let mut state = self.world.resource_mut::<GlobalState>();
                state.paused = !state.paused;
                info!(paused = state.paused, "Pause toggled");
            }
            GameCommand::ResetLevel => self.reset_level()?,
            GameCommand::Exit => {
                self.world.resource_mut::<GlobalState>().exit = true;
            }
        }
        Ok(())
    }

    /// Restores the level-start state: every agent back at its spawn, all pellets back on the
    /// board, score and lives restored. The tick counter keeps running.
    pub fn reset_level(&mut self) -> GameResult<()> {
        let grid = TileGrid::new(&RAW_BOARD)?;
        self.world.insert_resource(grid);
        self.world.insert_resource(ScoreResource(0));
        self.world.insert_resource(RestartTimer(None));
        {
            let mut state = self.world.resource_mut::<GlobalState>();
            state.paused = false;
            state.game_over = false;
        }

        let mut players = self.world.query::<(&mut Pacman, &mut Body)>();
        for (mut pacman, mut body) in players.iter_mut(&mut self.world) {
            pacman.reset(&mut body);
        }

        let mut ghosts = self.world.query::<(&mut Ghost, &mut Body)>();
        for (mut ghost, mut body) in ghosts.iter_mut(&mut self.world) {
            ghost.reset(&mut body);
        }

        info!("Level reset");
        Ok(())
    }

    pub fn tick_count(&self) -> u64 {
        self.world.resource::<TickCounter>().0
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn pellets_remaining(&self) -> usize {
        self.world.resource::<TileGrid>().pellets_remaining()
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<GlobalState>().paused
    }

    pub fn is_over(&self) -> bool {
        self.world.resource::<GlobalState>().game_over
    }

    pub fn should_exit(&self) -> bool {
        self.world.resource::<GlobalState>().exit
    }

    pub fn lives(&mut self) -> Option<u8> {
        let mut players = self.world.query::<&Pacman>();
        players.single(&self.world).ok().map(Pacman::lives)
    }

    pub fn player_body(&mut self) -> Option<Body> {
        let mut players = self.world.query::<(&Pacman, &Body)>();
        players.single(&self.world).ok().map(|(_, body)| *body)
    }

    pub fn player_animation(&mut self) -> Option<PlayerAnimation> {
        let mut players = self.world.query::<(&Pacman, &Body)>();
        players.single(&self.world).ok().map(|(pacman, body)| pacman.animation(body))
    }

    pub fn ghost_body(&mut self, ghost_type: GhostType) -> Option<Body> {
        let mut ghosts = self.world.query::<(&Ghost, &Body)>();
        ghosts
            .iter(&self.world)
            .find(|(ghost, _)| ghost.ghost_type() == ghost_type)
            .map(|(_, body)| *body)
    }

    pub fn ghost_mode(&mut self, ghost_type: GhostType) -> Option<GhostMode> {
        let mut ghosts = self.world.query::<&Ghost>();
        ghosts
            .iter(&self.world)
            .find(|ghost| ghost.ghost_type() == ghost_type)
            .map(Ghost::mode)
    }

    pub fn ghost_animation(&mut self, ghost_type: GhostType) -> Option<GhostAnimation> {
        let mut ghosts = self.world.query::<&Ghost>();
        ghosts
            .iter(&self.world)
            .find(|ghost| ghost.ghost_type() == ghost_type)
            .map(Ghost::animation)
    }
}
