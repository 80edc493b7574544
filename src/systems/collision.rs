use bevy_ecs::{
    event::EventWriter,
    query::Without,
    system::{Query, Res, ResMut},
};
use tracing::debug;

use crate::{
    config::EngineConfig,
    constants::GHOST_SCORE,
    entity::{body::Body, ghost::Ghost, mode::GhostMode, pacman::Pacman},
    error::GameError,
    events::GameEvent,
    map::grid::distance,
    systems::components::{Collider, RestartTimer, ScoreResource, TickCounter},
};

/// Helper function to check collision between two bodies with colliders.
pub fn check_collision(body1: &Body, collider1: &Collider, body2: &Body, collider2: &Collider) -> bool {
    collider1.collides_with(collider2.radius, distance(body1.position, body2.position))
}

/// Resolves overlaps between the player and the ghosts.
///
/// A frightened ghost is eaten and scores; a scattering or chasing ghost kills the player and
/// arms the restart timer; an eaten ghost passes through harmlessly.
#[allow(clippy::too_many_arguments)]
pub fn collision_system(
    config: Res<EngineConfig>,
    tick: Res<TickCounter>,
    mut score: ResMut<ScoreResource>,
    mut restart: ResMut<RestartTimer>,
    mut players: Query<(&mut Pacman, &mut Body, &Collider), Without<Ghost>>,
    mut ghosts: Query<(&mut Ghost, &mut Body, &Collider), Without<Pacman>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let (mut pacman, mut player_body, player_collider) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for collision system: {}",
                e
            )));
            return;
        }
    };

    for (mut ghost, mut ghost_body, ghost_collider) in ghosts.iter_mut() {
        if !pacman.is_alive() {
            break;
        }
        if !check_collision(&player_body, player_collider, &ghost_body, ghost_collider) {
            continue;
        }

        let ghost_type = ghost.ghost_type();
        match ghost.mode() {
            GhostMode::Frightened => {
                if let Some(event) = ghost.eaten(&mut ghost_body, tick.0) {
                    events.write(GameEvent::from_ghost(ghost_type, event));
                }
                score.0 += GHOST_SCORE;
                debug!(ghost = ghost_type.as_ref(), score = score.0, "Ghost eaten");
                events.write(GameEvent::GhostEaten(ghost_type));
            }
            GhostMode::Scatter | GhostMode::Chase => {
                if let Some(event) = pacman.die(&mut player_body) {
                    events.write(event.into());
                }
                restart.0 = Some(tick.0 + config.ticks(config.restart_delay));
                debug!(ghost = ghost_type.as_ref(), lives = pacman.lives(), "Player caught");
            }
            GhostMode::Eaten => {}
        }
    }
}
