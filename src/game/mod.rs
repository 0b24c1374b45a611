//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver owns the pacing: it feeds directions and calls
//! [`Simulation::advance_tick`] once per tick.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::Simulation;
pub use error::{ConfigError, InvalidDirection, SimulationError};
pub use state::{CollisionType, GridPosition, Segment, Snake, Snapshot, Status};
