//! Centralized error types for the engine.
//!
//! The per-tick decision core never fails; every error here comes from building a level
//! (board parsing, configuration) or from inconsistent host-side state.

use bevy_ecs::event::Event;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("Board row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("Board must have at least one row")]
    EmptyBoard,
    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
}

/// Errors raised when validating an `EngineConfig`.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Tile size must be positive, got {0}")]
    InvalidTileSize(f32),

    #[error("Speed for {what} must be positive, got {value}")]
    InvalidSpeed { what: &'static str, value: f32 },

    #[error("Duration {0} must be non-zero")]
    ZeroDuration(&'static str),

    #[error("Tick rate must be non-zero")]
    ZeroTickRate,

    #[error("{what} tile {tile} lies outside the board")]
    TileOutOfBounds { what: &'static str, tile: glam::IVec2 },
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
