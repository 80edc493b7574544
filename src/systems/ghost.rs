use bevy_ecs::{
    event::EventWriter,
    query::Without,
    system::{Query, Res, ResMut},
};

use crate::{
    entity::{
        body::Body,
        ghost::{Ghost, GhostContext, GhostType},
        pacman::Pacman,
    },
    error::GameError,
    events::GameEvent,
    map::grid::TileGrid,
    systems::components::{GameRng, TickCounter},
};

/// Runs every ghost's decision logic for this tick.
///
/// All ghosts see the same snapshot of the player and of the flank partner, taken before any
/// ghost moves.
pub fn ghost_system(
    grid: Res<TileGrid>,
    tick: Res<TickCounter>,
    mut rng: ResMut<GameRng>,
    players: Query<(&Pacman, &Body), Without<Ghost>>,
    mut ghosts: Query<(&mut Ghost, &mut Body), Without<Pacman>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let (pacman, player_body) = match players.single() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for ghost system: {}",
                e
            )));
            return;
        }
    };

    let partner_position = ghosts
        .iter()
        .find(|(ghost, _)| ghost.ghost_type() == GhostType::FLANK_PARTNER)
        .map(|(_, body)| body.position);

    let context = GhostContext {
        tick: tick.0,
        player_position: player_body.position,
        player_facing: pacman.facing(),
        partner_position,
    };

    for (mut ghost, mut body) in ghosts.iter_mut() {
        let ghost_type = ghost.ghost_type();
        for event in ghost.update(&mut body, &*grid, &context, &mut rng.0) {
            events.write(GameEvent::from_ghost(ghost_type, event));
        }
    }
}
