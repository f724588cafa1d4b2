//! Error type shared by every fallible operation in the engine.

/// Errors surfaced by the engine.
///
/// Every variant is a caller mistake: a malformed grid, a direction token
/// that names no direction, a spawn on a full board, or a bad configuration.
/// None of them are transient, so retrying never helps.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("grid has no rows")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two")]
    InvalidTile { row: usize, col: usize, value: u32 },
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("cannot spawn a tile on a full board")]
    BoardFull,
    #[error("probability of a 4 tile must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
