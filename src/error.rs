use thiserror::Error;

/// Errors surfaced by the engine's checked accessors and constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell ({row}, {col}) is out of range for a {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },
    #[error("invalid tile value {0}: must be 0 or a power of two >= 2")]
    InvalidTile(u32),
    #[error("board side must be at least 2, got {0}")]
    TooSmall(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
}
