//! Error types

use std::path::PathBuf;

use crate::board::Position;

/// Rejected `apply_move`/`undo` requests. The game is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("no legal move from {start} to {end}")]
    NoMatchingMove { start: Position, end: Position },

    #[error("{candidates} legal capture sequences lead from {start} to {end}; specify the captures")]
    AmbiguousMove {
        start: Position,
        end: Position,
        candidates: usize,
    },

    #[error("no move to undo")]
    NothingToUndo,
}

/// Failures decoding persisted state or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum DameError {
    #[error("malformed board state: {0}")]
    MalformedBoard(#[source] serde_json::Error),

    #[error("malformed position: {0}")]
    MalformedPosition(#[source] serde_json::Error),

    #[error("invalid piece record at {pos}: {reason}")]
    InvalidPiece { pos: Position, reason: &'static str },

    #[error("multi-jump pin at {pos}: {reason}")]
    InvalidPin { pos: Position, reason: &'static str },

    #[error("position {0} is off the board")]
    OffBoard(Position),

    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed game record {path}: {source}")]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid rules in {path}: {reason}")]
    InvalidRules { path: PathBuf, reason: &'static str },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DameError>;
