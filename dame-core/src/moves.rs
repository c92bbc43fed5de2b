//! Move representation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// A move from `start` to `end`, removing `captures` in jump order.
/// An empty capture list is a simple move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Position,
    pub end: Position,
    #[serde(default)]
    pub captures: Vec<Position>,
}

impl Move {
    /// Non-capturing move
    pub fn simple(start: Position, end: Position) -> Self {
        Self { start, end, captures: Vec::new() }
    }

    /// Capture sequence
    pub fn capture(start: Position, end: Position, captures: Vec<Position>) -> Self {
        Self { start, end, captures }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    /// Same start and end squares, captures ignored
    pub fn same_path(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_capture() {
            return write!(f, "{}-{}", self.start, self.end);
        }
        write!(f, "{}x{} [captures", self.start, self.end)?;
        for cap in &self.captures {
            write!(f, " {}", cap)?;
        }
        write!(f, "]")
    }
}
