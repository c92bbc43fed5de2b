//! Players and piece definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row delta of a man's forward step
    pub fn forward(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// Far rank where this player's men are crowned
    pub fn promotion_row(self) -> i8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "WHITE"),
            Player::Black => write!(f, "BLACK"),
        }
    }
}

/// Piece rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PieceType {
    Man,
    King,
}

/// A piece on the board. The owner never changes; the type only goes from
/// man to king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    owner: Player,
    #[serde(rename = "type")]
    kind: PieceType,
}

impl Piece {
    pub const fn new(owner: Player, kind: PieceType) -> Self {
        Self { owner, kind }
    }

    pub const fn man(owner: Player) -> Self {
        Self::new(owner, PieceType::Man)
    }

    pub const fn king(owner: Player) -> Self {
        Self::new(owner, PieceType::King)
    }

    pub fn owner(&self) -> Player {
        self.owner
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceType::King
    }

    /// Crown this piece. Kings are never demoted.
    pub fn promote(&mut self) {
        self.kind = PieceType::King;
    }

    /// Board glyph: `w`/`b` for men, `W`/`B` for kings
    pub fn symbol(&self) -> char {
        match (self.owner, self.kind) {
            (Player::White, PieceType::Man) => 'w',
            (Player::White, PieceType::King) => 'W',
            (Player::Black, PieceType::Man) => 'b',
            (Player::Black, PieceType::King) => 'B',
        }
    }
}
