use bevy_ecs::{
    event::EventWriter,
    query::Without,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    constants::{MapTile, PELLET_SCORE, POWER_PELLET_SCORE},
    entity::{body::Body, ghost::Ghost, pacman::Pacman},
    error::GameError,
    events::GameEvent,
    map::grid::TileGrid,
    systems::components::{ScoreResource, TickCounter},
};

/// Returns the score awarded for consuming a tile, if it is consumable.
pub fn score_value(tile: MapTile) -> Option<u32> {
    match tile {
        MapTile::Pellet => Some(PELLET_SCORE),
        MapTile::PowerPellet => Some(POWER_PELLET_SCORE),
        _ => None,
    }
}

/// Consumes the pellet under the player, if any.
///
/// A power pellet also frightens every ghost that is not already heading home. Clearing the last
/// pellet announces [`GameEvent::LevelCleared`].
#[allow(clippy::too_many_arguments)]
pub fn item_system(
    config: Res<EngineConfig>,
    tick: Res<TickCounter>,
    mut grid: ResMut<TileGrid>,
    mut score: ResMut<ScoreResource>,
    players: Query<(&Pacman, &Body), Without<Ghost>>,
    mut ghosts: Query<(&mut Ghost, &mut Body), Without<Pacman>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let (pacman, body) = match players.single() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for item system: {}",
                e
            )));
            return;
        }
    };

    if !pacman.is_alive() {
        return;
    }

    let tile = body.marker(config.tile_size);
    let Some(value) = grid.tile_at(tile).and_then(score_value) else {
        return;
    };

    let consumed = grid.set_tile(tile, MapTile::Empty);
    score.0 += value;

    if consumed == Some(MapTile::PowerPellet) {
        debug!(tile = ?tile, score = score.0, "Power pellet eaten");
        events.write(GameEvent::PowerPelletEaten { tile });
        for (mut ghost, mut ghost_body) in ghosts.iter_mut() {
            let ghost_type = ghost.ghost_type();
            if let Some(event) = ghost.frighten(&mut ghost_body, tick.0) {
                events.write(GameEvent::from_ghost(ghost_type, event));
            }
        }
    } else {
        debug!(tile = ?tile, score = score.0, "Pellet eaten");
        events.write(GameEvent::PelletEaten { tile });
    }

    if grid.pellets_remaining() == 0 {
        info!(score = score.0, "Level cleared");
        events.write(GameEvent::LevelCleared);
    }
}
