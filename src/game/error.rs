use thiserror::Error;

use super::state::GridPosition;

/// Raw direction input that is not a single axis-aligned step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid direction offset ({dx}, {dy})")]
pub struct InvalidDirection {
    pub dx: i32,
    pub dy: i32,
}

/// Errors raised when driving a simulation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The snake already collided; a fresh simulation is required
    #[error("simulation already terminated with score {score}")]
    AlreadyTerminated { score: u32 },
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("a {width}x{height} grid of {cell_size}-unit cells does not fit the coordinate range")]
    FieldTooLarge {
        width: usize,
        height: usize,
        cell_size: i32,
    },

    #[error("{what} {position} is not aligned to cell size {cell_size}")]
    Misaligned {
        what: &'static str,
        position: GridPosition,
        cell_size: i32,
    },

    #[error("{what} {position} lies outside the {width}x{height} field")]
    OutOfBounds {
        what: &'static str,
        position: GridPosition,
        width: i32,
        height: i32,
    },
}
