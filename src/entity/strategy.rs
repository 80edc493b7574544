//! Chase-mode target selection.
//!
//! Each ghost archetype pursues a different point while chasing. Everything else about ghost
//! movement is shared, so a strategy only answers one question: where is the target?

use std::fmt;

use glam::Vec2;

use crate::map::direction::Direction;
use crate::map::grid::distance;

/// Everything a strategy may look at when picking its target. All positions are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    /// The ghost's current position.
    pub ghost_position: Vec2,
    pub player_position: Vec2,
    /// The player's last committed heading; `None` before the player first moves.
    pub player_facing: Option<Direction>,
    /// Position of the partner ghost the flanking strategy pivots around.
    pub partner_position: Option<Vec2>,
    /// The ghost's own scatter anchor.
    pub scatter_anchor: Vec2,
    pub tile_size: f32,
}

impl Pursuit {
    /// The point `tiles` tiles ahead of the player along its facing. Without a facing, the player itself.
    pub fn ahead_of_player(&self, tiles: f32) -> Vec2 {
        let offset = self
            .player_facing
            .map_or(Vec2::ZERO, |facing| facing.as_vec2() * tiles * self.tile_size);
        self.player_position + offset
    }
}

/// Computes the chase-mode target of a ghost archetype.
pub trait TargetStrategy: fmt::Debug + Send + Sync {
    fn target(&self, pursuit: &Pursuit) -> Vec2;

    /// How bad it is to step to `candidate`; lower is better.
    fn badness(&self, candidate: Vec2, pursuit: &Pursuit) -> f32 {
        distance(candidate, self.target(pursuit))
    }
}

/// Heads straight for the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectChase;

impl TargetStrategy for DirectChase {
    fn target(&self, pursuit: &Pursuit) -> Vec2 {
        pursuit.player_position
    }
}

/// Aims a few tiles ahead of the player to cut it off.
#[derive(Debug, Clone, Copy)]
pub struct Ambush {
    pub lead_tiles: f32,
}

impl TargetStrategy for Ambush {
    fn target(&self, pursuit: &Pursuit) -> Vec2 {
        pursuit.ahead_of_player(self.lead_tiles)
    }
}

/// Reflects a point ahead of the player through the partner ghost, pinching the player between them.
#[derive(Debug, Clone, Copy)]
pub struct Flank {
    pub lead_tiles: f32,
}

impl Flank {
    /// `partner + 2 * (pivot - partner)`.
    pub fn reflect(pivot: Vec2, partner: Vec2) -> Vec2 {
        partner + 2.0 * (pivot - partner)
    }
}

impl TargetStrategy for Flank {
    fn target(&self, pursuit: &Pursuit) -> Vec2 {
        let pivot = pursuit.ahead_of_player(self.lead_tiles);
        match pursuit.partner_position {
            Some(partner) => Self::reflect(pivot, partner),
            None => pivot,
        }
    }
}

/// Chases while far from the player and retreats to its scatter anchor once close.
#[derive(Debug, Clone, Copy)]
pub struct Ambivalent {
    pub radius_tiles: f32,
}

impl TargetStrategy for Ambivalent {
    fn target(&self, pursuit: &Pursuit) -> Vec2 {
        let gap = distance(pursuit.ghost_position, pursuit.player_position);
        if gap > self.radius_tiles * pursuit.tile_size {
            pursuit.player_position
        } else {
            pursuit.scatter_anchor
        }
    }
}

/// Picks the lowest-scoring direction.
///
/// Candidates are considered in the order given, and a later candidate only wins when it is
/// strictly better, so ties resolve to the earliest one. Callers feed candidates in
/// [`Direction::DIRECTIONS`] order.
pub fn select_direction(candidates: impl IntoIterator<Item = (Direction, f32)>) -> Option<Direction> {
    candidates
        .into_iter()
        .fold(None, |best: Option<(Direction, f32)>, (direction, score)| match best {
            Some((_, best_score)) if score >= best_score => best,
            _ => Some((direction, score)),
        })
        .map(|(direction, _)| direction)
}
