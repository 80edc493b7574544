//! The static tile grid and the world/tile geometry helpers.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2, Vec2};

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::map::parser::MapTileParser;

/// Occupancy queries against the static collision layer.
///
/// This is the only view of the map the decision core needs.
pub trait WallMap {
    /// Whether the tile blocks movement.
    fn is_wall(&self, tile: IVec2) -> bool;

    /// Whether the tile is the pen door, which ghosts may cross under some conditions.
    fn is_door(&self, _tile: IVec2) -> bool {
        false
    }
}

/// Converts a world coordinate into a tile index by floor division.
pub fn snap_to_tile(coordinate: f32, tile_size: f32) -> i32 {
    (coordinate / tile_size).floor() as i32
}

/// The tile containing a world position.
pub fn marker_of(position: Vec2, tile_size: f32) -> IVec2 {
    IVec2::new(snap_to_tile(position.x, tile_size), snap_to_tile(position.y, tile_size))
}

/// Euclidean distance, only ever used to rank candidates.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// The world-space center of a tile.
pub fn tile_center(tile: IVec2, tile_size: f32) -> Vec2 {
    tile.as_vec2() * tile_size + Vec2::splat(tile_size / 2.0)
}

/// A rectangular tile map.
///
/// Rows outside the board are solid. Columns outside the board mirror the edge tile of
/// their row, so tunnel rows stay open past either side and every other row stays closed.
#[derive(Resource, Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<MapTile>,
    size: UVec2,
    house_door: [IVec2; 2],
}

impl TileGrid {
    /// Parses a raw board into a grid.
    pub fn new(raw_board: &[&str]) -> Result<Self, ParseError> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        Ok(Self {
            tiles: parsed.tiles,
            size: parsed.size,
            house_door: parsed.house_door,
        })
    }

    /// The board dimensions, in tiles.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn house_door(&self) -> [IVec2; 2] {
        self.house_door
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.size.x && (tile.y as u32) < self.size.y
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        self.contains(tile)
            .then(|| tile.y as usize * self.size.x as usize + tile.x as usize)
    }

    /// Returns the tile stored at an in-bounds coordinate.
    pub fn tile_at(&self, tile: IVec2) -> Option<MapTile> {
        self.index(tile).map(|i| self.tiles[i])
    }

    /// Replaces an in-bounds tile, returning the previous one.
    pub fn set_tile(&mut self, tile: IVec2, value: MapTile) -> Option<MapTile> {
        let index = self.index(tile)?;
        Some(std::mem::replace(&mut self.tiles[index], value))
    }

    /// Number of pellets (regular and power) still on the board.
    pub fn pellets_remaining(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, MapTile::Pellet | MapTile::PowerPellet))
            .count()
    }

    /// Looks a coordinate up, applying the out-of-bounds rules.
    fn resolve(&self, tile: IVec2) -> Option<MapTile> {
        if tile.y < 0 || tile.y as u32 >= self.size.y {
            return None;
        }
        let column = tile.x.clamp(0, self.size.x as i32 - 1);
        self.tile_at(IVec2::new(column, tile.y))
    }
}

impl WallMap for TileGrid {
    fn is_wall(&self, tile: IVec2) -> bool {
        !matches!(
            self.resolve(tile),
            Some(MapTile::Empty | MapTile::Pellet | MapTile::PowerPellet | MapTile::Tunnel)
        )
    }

    fn is_door(&self, tile: IVec2) -> bool {
        matches!(self.resolve(tile), Some(MapTile::Door))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_tile_floors_negative_coordinates() {
        assert_eq!(snap_to_tile(0.0, 12.0), 0);
        assert_eq!(snap_to_tile(11.9, 12.0), 0);
        assert_eq!(snap_to_tile(12.0, 12.0), 1);
        assert_eq!(snap_to_tile(-0.5, 12.0), -1);
    }

    #[test]
    fn test_tile_center() {
        assert_eq!(tile_center(IVec2::new(0, 0), 12.0), Vec2::new(6.0, 6.0));
        assert_eq!(tile_center(IVec2::new(5, 2), 12.0), Vec2::new(66.0, 30.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }
}
