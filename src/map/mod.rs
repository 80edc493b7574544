//! Tile grid, board parsing and the geometry that maps world units onto tiles.

pub mod direction;
pub mod grid;
pub mod parser;
