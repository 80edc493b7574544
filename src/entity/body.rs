//! Continuous position and velocity, plus the tile-alignment queries shared by every agent.

use bevy_ecs::component::Component;
use bitflags::bitflags;
use glam::{IVec2, Vec2};

use crate::map::direction::Direction;
use crate::map::grid::{marker_of, tile_center, WallMap};

/// An agent's physical state.
///
/// The engine reads the position and writes the velocity; the host integrates between ticks.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Body {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Teleports the body and halts it.
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }

    /// Advances the position by the current velocity over `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// The tile currently containing the body.
    pub fn marker(&self, tile_size: f32) -> IVec2 {
        marker_of(self.position, tile_size)
    }

    /// The center of the current tile, where direction changes happen.
    pub fn turning_point(&self, tile_size: f32) -> Vec2 {
        tile_center(self.marker(tile_size), tile_size)
    }

    /// Whether the floored position lies strictly within `tolerance` of `point` on both axes.
    pub fn is_near(&self, point: Vec2, tolerance: f32) -> bool {
        let floored = self.position.floor();
        (floored.x - point.x).abs() < tolerance && (floored.y - point.y).abs() < tolerance
    }

    /// Whether the body has reached or passed `point` travelling in `direction`.
    pub fn has_reached(&self, point: Vec2, direction: Direction) -> bool {
        (point - self.position).dot(direction.as_vec2()) <= 0.0
    }

    /// Moves at `speed` along `direction`.
    pub fn steer(&mut self, direction: Direction, speed: f32) {
        self.velocity = direction.as_vec2() * speed;
    }

    /// Relocates the body to the opposite edge when it leaves the playfield horizontally.
    ///
    /// Returns true if a wrap happened. Vertical position is never touched.
    pub fn wrap_horizontal(&mut self, width: f32) -> bool {
        if self.position.x < 0.0 {
            self.position.x = width;
            true
        } else if self.position.x > width {
            self.position.x = 0.0;
            true
        } else {
            false
        }
    }
}

bitflags! {
    /// The set of neighbouring tiles an agent may step into.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Openings: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl From<Direction> for Openings {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Openings::UP,
            Direction::Down => Openings::DOWN,
            Direction::Left => Openings::LEFT,
            Direction::Right => Openings::RIGHT,
        }
    }
}

impl Openings {
    /// Probes the four neighbours of `marker`. `blocked` decides whether a neighbour reached by
    /// a given direction is impassable.
    pub fn probe(marker: IVec2, mut blocked: impl FnMut(IVec2, Direction) -> bool) -> Self {
        Direction::DIRECTIONS
            .into_iter()
            .filter(|&direction| !blocked(marker + direction.as_ivec2(), direction))
            .fold(Openings::empty(), |openings, direction| openings | Openings::from(direction))
    }

    /// Probes the four neighbours of `marker` against plain walls.
    pub fn around(marker: IVec2, walls: &impl WallMap) -> Self {
        Self::probe(marker, |tile, _| walls.is_wall(tile))
    }

    pub fn allows(self, direction: Direction) -> bool {
        self.contains(direction.into())
    }

    pub fn without(self, direction: Direction) -> Self {
        self - Openings::from(direction)
    }

    /// The open directions, in tie-break priority order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::DIRECTIONS.into_iter().filter(move |&d| self.allows(d))
    }

    pub fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_near_uses_floored_position() {
        let body = Body::new(Vec2::new(31.9, 30.0));
        assert!(body.is_near(Vec2::new(30.0, 30.0), 2.0));
        let body = Body::new(Vec2::new(32.0, 30.0));
        assert!(!body.is_near(Vec2::new(30.0, 30.0), 2.0));
    }

    #[test]
    fn test_has_reached() {
        let body = Body::new(Vec2::new(30.0, 10.0));
        assert!(body.has_reached(Vec2::new(30.0, 10.0), Direction::Right));
        assert!(body.has_reached(Vec2::new(28.0, 10.0), Direction::Right));
        assert!(!body.has_reached(Vec2::new(28.0, 10.0), Direction::Left));
    }

    #[test]
    fn test_openings_order_and_removal() {
        let all = Openings::all();
        let order: Vec<_> = all.directions().collect();
        assert_eq!(order, Direction::DIRECTIONS.to_vec());
        assert_eq!(all.without(Direction::Up).count(), 3);
        assert!(!all.without(Direction::Up).allows(Direction::Up));
    }
}
