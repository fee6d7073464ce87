//! Grid rule engine: sliding, merging, spawning and terminal detection.
//!
//! The engine is synchronous and has no notion of time. A move returns a
//! complete [`MoveResult`] whose ordered events a renderer may replay at
//! whatever pace it likes.
//!
//! ```
//! use grid_2048::engine::{Direction, Grid, GridEngine};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![2, 2, 4, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//! ]).unwrap();
//! let mut engine = GridEngine::from_grid(grid, 7);
//! let result = engine.apply_move(Direction::Left);
//! assert!(result.moved);
//! assert_eq!(result.score_delta, 4);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DirectionInput, EngineError};

pub mod events;
pub mod grid;
pub mod ops;
pub mod scan;
mod state;

pub use events::{MoveResult, SpawnEvent, TileEvent, TileId};
pub use grid::{Cell, Grid};
pub use ops::shift;
pub use scan::scan_order;
pub use state::GridEngine;

/// Default edge length of the grid.
pub const DEFAULT_SIZE: usize = 4;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector `(dx, dy)`; `y` grows downwards.
    #[inline]
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Decode a unit vector. Anything other than the four axis-aligned unit
    /// vectors is rejected.
    pub fn from_vector(dx: i32, dy: i32) -> Result<Self, EngineError> {
        match (dx, dy) {
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirection(DirectionInput::Vector(dx, dy))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(DirectionInput::Name(s.to_string()))),
        }
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = EngineError;

    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        Direction::from_vector(dx, dy)
    }
}
