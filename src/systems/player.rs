use bevy_ecs::{
    event::EventWriter,
    query::Without,
    system::{Query, Res},
};

use crate::{
    entity::{body::Body, ghost::Ghost, pacman::Pacman},
    error::GameError,
    events::GameEvent,
    map::grid::TileGrid,
};

/// Runs the player's movement logic for this tick.
///
/// Buffered direction requests are committed at turning points, and the player is halted on the
/// turning point of any tile whose next neighbour along its heading is a wall.
pub fn player_system(
    grid: Res<TileGrid>,
    mut players: Query<(&mut Pacman, &mut Body), Without<Ghost>>,
    mut events: EventWriter<GameEvent>,
    mut errors: EventWriter<GameError>,
) {
    let (mut pacman, mut body) = match players.single_mut() {
        Ok(tuple) => tuple,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player system: {}",
                e
            )));
            return;
        }
    };

    for event in pacman.update(&mut body, &*grid) {
        events.write(event.into());
    }
}
