use thiserror::Error;

use super::util::Position;

/// Errors raised while loading boards and word lists. The search itself never fails.
#[derive(Error, Debug)]
pub enum BoggleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed board header: {0}")]
    BadHeader(String),

    #[error("Board must have at least one row and one column")]
    EmptyBoard,

    #[error("Board of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Invalid tile {tile:?} at {pos:?}")]
    InvalidTile { tile: String, pos: Position },
}

pub type BoggleResult<T> = Result<T, BoggleError>;
