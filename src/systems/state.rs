//! Tick bookkeeping, run conditions and the death/restart cycle.

use bevy_ecs::{
    event::EventWriter,
    query::Without,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    entity::{body::Body, ghost::Ghost, pacman::Pacman},
    error::GameError,
    events::GameEvent,
    systems::components::{GlobalState, RestartTimer, TickCounter},
};

/// Advances the tick counter. Runs first in every unpaused tick.
pub fn tick_system(mut tick: ResMut<TickCounter>) {
    tick.0 += 1;
}

/// Run condition: the simulation advances at all.
pub fn is_running(state: Res<GlobalState>) -> bool {
    !state.paused && !state.exit
}

/// Run condition: agents may think and move. False while a death is being played out and after
/// the game is over.
pub fn agents_active(state: Res<GlobalState>, restart: Res<RestartTimer>) -> bool {
    !state.game_over && restart.0.is_none()
}

/// Once the restart delay after a death has elapsed, either puts every agent back on its spawn
/// point or ends the game when no lives are left. Pellets and score are kept.
pub fn restart_system(
    tick: Res<TickCounter>,
    mut restart: ResMut<RestartTimer>,
    mut state: ResMut<GlobalState>,
    mut players: Query<(&mut Pacman, &mut Body), Without<Ghost>>,
    mut ghosts: Query<(&mut Ghost, &mut Body), Without<Pacman>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let Some(deadline) = restart.0 else {
        return;
    };
    if tick.0 < deadline {
        return;
    }
    restart.0 = None;

    let (mut pacman, mut body) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for restart system: {}",
                e
            )));
            return;
        }
    };

    if pacman.lives() == 0 {
        info!(tick = tick.0, "Game over");
        state.game_over = true;
        events.write(GameEvent::GameOver);
        return;
    }

    pacman.respawn(&mut body);
    for (mut ghost, mut ghost_body) in ghosts.iter_mut() {
        ghost.reset(&mut ghost_body);
    }
    debug!(lives = pacman.lives(), "Agents respawned");
    events.write(GameEvent::PlayerRespawned);
}
