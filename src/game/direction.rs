use serde::{Deserialize, Serialize};

use super::error::InvalidDirection;

/// Direction the snake head travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit delta (dx, dy) for this direction, y growing downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Returns the offset travelled in one tick on a grid of `cell_size`
    pub fn offset(&self, cell_size: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (dx * cell_size, dy * cell_size)
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = InvalidDirection;

    /// Parses a raw offset. Only axis-aligned steps are accepted; the magnitude
    /// is irrelevant since the simulation rescales to its own cell size.
    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(InvalidDirection { dx, dy }),
        }
    }
}
