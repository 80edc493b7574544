use std::env;

use anyhow::{Context, Result};
use pacman_core::app::App;
use pacman_core::config::EngineConfig;
use pacman_core::constants::{Ticks, LOOP_TIME, TICKS_PER_SECOND};
use pacman_core::formatter::CustomFormatter;
use pacman_core::game::Game;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// How long the demo runs when no tick count is given.
const DEFAULT_TICKS: Ticks = 60 * TICKS_PER_SECOND as Ticks;

/// Runs the engine headless with scripted input.
///
/// Usage: `pacman-core [ticks] [seed]`. Logging follows `RUST_LOG`, defaulting to `debug`.
pub fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;

    let mut args = env::args().skip(1);
    let max_ticks = match args.next() {
        Some(arg) => arg.parse::<Ticks>().with_context(|| format!("Invalid tick count: {arg}"))?,
        None => DEFAULT_TICKS,
    };
    let seed = args
        .next()
        .map(|arg| arg.parse::<u64>().with_context(|| format!("Invalid seed: {arg}")))
        .transpose()?;

    let config = EngineConfig::default();
    let game = match seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    }
    .context("Could not build the level")?;

    info!(loop_time = ?LOOP_TIME, max_ticks, seed, "Starting game loop");

    let mut app = App::new(game, App::demo_script(), max_ticks);
    let mut frame: Ticks = 0;
    while app.run(frame) {
        frame += 1;
    }

    let game = app.game();
    info!(ticks = game.tick_count(), score = game.score(), game_over = game.is_over(), "Finished");
    Ok(())
}
