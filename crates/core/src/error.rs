//! Error types for chess-duel-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Square out of bounds: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },

    #[error("Invalid square name: {0}")]
    SquareName(String),

    #[error("Invalid board diagram: {0}")]
    Diagram(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
