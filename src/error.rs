use std::fmt;

/// Errors raised at the engine's validation boundaries.
///
/// Running out of empty cells or moves is not an error; those are reported
/// through `Option`/`bool` return values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid size must be at least 2, got {size}")]
    InvalidSize { size: usize },
    #[error("invalid direction: {0}")]
    InvalidDirection(DirectionInput),
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("{len} cells cannot fill a grid of {size} cells per side")]
    CellCount { size: usize, len: usize },
    #[error("cell ({x}, {y}) holds {value}, which is not 0 or a power of two >= 2")]
    InvalidTile { x: usize, y: usize, value: u32 },
}

/// The raw input that failed to decode into a `Direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionInput {
    Vector(i32, i32),
    Name(String),
}

impl fmt::Display for DirectionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionInput::Vector(dx, dy) => write!(f, "vector ({dx}, {dy})"),
            DirectionInput::Name(name) => write!(f, "name {name:?}"),
        }
    }
}
