//! Movement and decision engine for a grid-based Pac-Man chase game.
//!
//! The host owns continuous positions and integrates velocities; the engine decides, once per
//! tick, which way every agent heads and at what speed.

pub mod app;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod systems;
