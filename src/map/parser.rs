//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::error::ParseError;
use glam::{IVec2, UVec2};

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedMap {
    /// The parsed tile layout, row-major.
    pub tiles: Vec<MapTile>,
    /// The board dimensions, in tiles.
    pub size: UVec2,
    /// The positions of the house door tiles.
    pub house_door: [IVec2; 2],
    /// The positions of the tunnel end tiles.
    pub tunnel_ends: [Option<IVec2>; 2],
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            '=' => Ok(MapTile::Door),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, if its rows differ in width, if it contains
    /// unknown characters, or if the house door is not exactly two '=' characters.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().ok_or(ParseError::EmptyBoard)?.chars().count();
        let mut tiles = Vec::with_capacity(width * raw_board.len());
        let mut doors: Vec<IVec2> = Vec::with_capacity(2);
        let mut tunnel_ends = [None; 2];

        for (y, line) in raw_board.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                match tile {
                    MapTile::Tunnel => {
                        if tunnel_ends[0].is_none() {
                            tunnel_ends[0] = Some(position);
                        } else {
                            tunnel_ends[1] = Some(position);
                        }
                    }
                    MapTile::Door => doors.push(position),
                    _ => {}
                }

                tiles.push(tile);
            }
        }

        let house_door: [IVec2; 2] = doors
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::InvalidHouseDoorCount(doors.len()))?;

        Ok(ParsedMap {
            tiles,
            size: UVec2::new(width as u32, raw_board.len() as u32),
            house_door,
            tunnel_ends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BOARD_CELL_SIZE, RAW_BOARD};

    #[test]
    fn test_parse_character() {
        assert!(matches!(MapTileParser::parse_character('#').unwrap(), MapTile::Wall));
        assert!(matches!(MapTileParser::parse_character('.').unwrap(), MapTile::Pellet));
        assert!(matches!(MapTileParser::parse_character('o').unwrap(), MapTile::PowerPellet));
        assert!(matches!(MapTileParser::parse_character(' ').unwrap(), MapTile::Empty));
        assert!(matches!(MapTileParser::parse_character('T').unwrap(), MapTile::Tunnel));
        assert!(matches!(MapTileParser::parse_character('=').unwrap(), MapTile::Door));

        assert!(MapTileParser::parse_character('Z').is_err());
    }

    #[test]
    fn test_parse_board() {
        let parsed = MapTileParser::parse_board(&RAW_BOARD).unwrap();

        assert_eq!(parsed.size, BOARD_CELL_SIZE);
        assert_eq!(parsed.tiles.len(), (BOARD_CELL_SIZE.x * BOARD_CELL_SIZE.y) as usize);
        assert_eq!(parsed.house_door, [IVec2::new(13, 15), IVec2::new(14, 15)]);
        assert_eq!(parsed.tunnel_ends, [Some(IVec2::new(0, 17)), Some(IVec2::new(27, 17))]);
    }

    #[test]
    fn test_parse_board_ragged_row() {
        let result = MapTileParser::parse_board(&["#==#", "##"]);
        assert_eq!(
            result.unwrap_err(),
            ParseError::RaggedRow {
                row: 1,
                found: 2,
                expected: 4
            }
        );
    }

    #[test]
    fn test_parse_board_missing_door() {
        let result = MapTileParser::parse_board(&["####", "#..#", "####"]);
        assert_eq!(result.unwrap_err(), ParseError::InvalidHouseDoorCount(0));
    }
}
