use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::direction::Direction;
use super::error::ConfigError;
use super::state::GridPosition;

/// Configuration for the game
///
/// Grid dimensions are counted in cells; positions (`initial_head`,
/// `apple_start`) are in field units, i.e. multiples of `cell_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Side length of one cell in field units
    pub cell_size: i32,
    /// Segments owed to the snake when the game starts
    pub initial_snake_length: u32,
    /// Where the head starts
    pub initial_head: GridPosition,
    /// Direction travelled before any input arrives
    pub initial_direction: Direction,
    /// Ticks per second; advisory, only the driver paces ticks
    pub tick_rate_hz: u32,
    /// Fixed first apple position, random when unset
    pub apple_start: Option<GridPosition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            cell_size: 15,
            initial_snake_length: 3,
            initial_head: GridPosition::new(15, 15),
            initial_direction: Direction::Down,
            tick_rate_hz: 10,
            apple_start: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a JSON configuration. Missing fields fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Field width in position units
    pub fn width(&self) -> i32 {
        self.grid_width as i32 * self.cell_size
    }

    /// Field height in position units
    pub fn height(&self) -> i32 {
        self.grid_height as i32 * self.cell_size
    }

    /// Strict bounds check: the far edges belong outside the field
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.x < self.width() && pos.y >= 0 && pos.y < self.height()
    }

    /// Time between two ticks at the configured rate
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if field_extent(self.grid_width, self.cell_size).is_none()
            || field_extent(self.grid_height, self.cell_size).is_none()
        {
            return Err(ConfigError::FieldTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                cell_size: self.cell_size,
            });
        }

        self.check_position("initial head", self.initial_head)?;
        if let Some(apple) = self.apple_start {
            self.check_position("apple start", apple)?;
        }

        Ok(())
    }

    fn check_position(&self, what: &'static str, position: GridPosition) -> Result<(), ConfigError> {
        if !position.is_aligned(self.cell_size) {
            return Err(ConfigError::Misaligned {
                what,
                position,
                cell_size: self.cell_size,
            });
        }
        if !self.contains(position) {
            return Err(ConfigError::OutOfBounds {
                what,
                position,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }
}

/// Cells times cell size, if it fits the coordinate type
fn field_extent(cells: usize, cell_size: i32) -> Option<i32> {
    i32::try_from(cells).ok()?.checked_mul(cell_size)
}
