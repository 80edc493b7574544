use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, event, info};

use crate::constants::{Ticks, LOOP_TIME};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::game::Game;
use crate::map::direction::Direction;

/// A headless driver standing in for a real input device: it replays a fixed list of commands
/// against a [`Game`] and paces ticks in real time.
pub struct App {
    game: Game,
    script: VecDeque<(Ticks, GameCommand)>,
    max_ticks: Ticks,
}

impl App {
    pub fn new(game: Game, mut script: Vec<(Ticks, GameCommand)>, max_ticks: Ticks) -> Self {
        script.sort_by_key(|(tick, _)| *tick);
        Self {
            game,
            script: script.into(),
            max_ticks,
        }
    }

    /// A short tour of the maze: a few turns, a pause and a resume.
    pub fn demo_script() -> Vec<(Ticks, GameCommand)> {
        vec![
            (30, GameCommand::MovePlayer(Direction::Up)),
            (150, GameCommand::MovePlayer(Direction::Left)),
            (300, GameCommand::MovePlayer(Direction::Down)),
            (420, GameCommand::TogglePause),
            (421, GameCommand::TogglePause),
            (480, GameCommand::MovePlayer(Direction::Right)),
            (700, GameCommand::MovePlayer(Direction::Up)),
            (900, GameCommand::MovePlayer(Direction::Left)),
        ]
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs one frame. Returns false once the app should stop.
    pub fn run(&mut self, frame: Ticks) -> bool {
        let start = Instant::now();

        while let Some(&(at, command)) = self.script.front() {
            if at > frame {
                break;
            }
            self.script.pop_front();
            debug!(frame, command = ?command, "Replaying command");
            if let Err(e) = self.game.apply_command(command) {
                tracing::error!(error = %e, "Failed to apply command");
            }
        }

        for game_event in self.game.tick(LOOP_TIME.as_secs_f32()) {
            match game_event {
                GameEvent::PlayerDied { lives_remaining } => info!(lives_remaining, "Player died"),
                GameEvent::GhostEaten(ghost) => info!(ghost = ghost.as_ref(), "Ghost eaten"),
                GameEvent::LevelCleared => info!(score = self.game.score(), "Level cleared"),
                GameEvent::GameOver => info!(score = self.game.score(), "Game over"),
                _ => {}
            }
        }
        formatter::set_tick(self.game.tick_count());

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            event!(
                tracing::Level::WARN,
                "Game loop behind schedule by: {:?}",
                start.elapsed() - LOOP_TIME
            );
        }

        frame + 1 < self.max_ticks && !self.game.should_exit() && !self.game.is_over() && self.game.pellets_remaining() > 0
    }
}
