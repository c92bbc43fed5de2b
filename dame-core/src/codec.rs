//! JSON encoding of persisted game state
//!
//! Board: array of occupied squares, `[{"row":5,"col":0,"owner":"WHITE","type":"MAN"}, ...]`.
//! Position: `{"row":3,"col":2}`, or an absent/empty value for "no pin".

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::config::RuleConfig;
use crate::error::{DameError, Result};
use crate::game::{GameLogic, GameState};
use crate::pieces::{Piece, PieceType, Player};

/// One occupied square
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct PieceRecord {
    row: i8,
    col: i8,
    owner: Player,
    #[serde(rename = "type")]
    kind: PieceType,
}

// ============================================================================
// BOARD
// ============================================================================

pub fn encode_board(board: &Board) -> Result<String> {
    let records: Vec<PieceRecord> = board
        .pieces()
        .map(|(pos, piece)| PieceRecord {
            row: pos.row,
            col: pos.col,
            owner: piece.owner(),
            kind: piece.kind(),
        })
        .collect();
    serde_json::to_string(&records).map_err(DameError::Encode)
}

/// Decode a board. An absent or blank payload is the starting position.
/// Off-board, light-square and duplicate records are rejected.
pub fn decode_board(json: Option<&str>) -> Result<Board> {
    let json = match json {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(Board::initial()),
    };

    let records: Vec<PieceRecord> = serde_json::from_str(json).map_err(DameError::MalformedBoard)?;
    let mut board = Board::new();
    let mut occupied = FxHashSet::default();

    for record in records {
        let pos = Position::new(record.row, record.col);
        if !pos.is_valid() {
            return Err(DameError::InvalidPiece { pos, reason: "off the board" });
        }
        if !pos.is_dark_square() {
            return Err(DameError::InvalidPiece { pos, reason: "light square" });
        }
        if !occupied.insert(pos) {
            return Err(DameError::InvalidPiece { pos, reason: "square listed twice" });
        }
        board.set(pos, Piece::new(record.owner, record.kind));
    }

    Ok(board)
}

// ============================================================================
// POSITION
// ============================================================================

pub fn encode_position(position: Option<Position>) -> Result<Option<String>> {
    position
        .map(|pos| serde_json::to_string(&pos).map_err(DameError::Encode))
        .transpose()
}

/// Decode a multi-jump pin. Absent, blank or `null` means no pin.
pub fn decode_position(json: Option<&str>) -> Result<Option<Position>> {
    let json = match json {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };
    let position: Option<Position> =
        serde_json::from_str(json).map_err(DameError::MalformedPosition)?;
    match position {
        Some(pos) if !pos.is_valid() => Err(DameError::OffBoard(pos)),
        other => Ok(other),
    }
}

// ============================================================================
// GAME RECORD
// ============================================================================

/// Game state as a storage collaborator keeps it between requests
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub board_state: Option<String>,
    pub current_turn: Player,
    #[serde(default)]
    pub game_state: GameState,
    #[serde(default)]
    pub multi_jump_position: Option<String>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            board_state: None,
            current_turn: Player::White,
            game_state: GameState::InProgress,
            multi_jump_position: None,
        }
    }
}

impl GameRecord {
    /// Encode the live state of a game
    pub fn capture(game: &GameLogic) -> Result<Self> {
        Ok(Self {
            board_state: Some(encode_board(game.board())?),
            current_turn: game.current_player(),
            game_state: game.state(),
            multi_jump_position: encode_position(game.multi_jump_position())?,
        })
    }

    /// Rebuild the game this record describes
    pub fn restore(&self, rules: RuleConfig) -> Result<GameLogic> {
        let board = decode_board(self.board_state.as_deref())?;
        let multi_jump = decode_position(self.multi_jump_position.as_deref())?;
        if let Some(pos) = multi_jump {
            check_pin(&board, self.current_turn, pos)?;
        }
        Ok(GameLogic::restore(board, self.current_turn, self.game_state, multi_jump).with_rules(rules))
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DameError::MalformedRecord {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(DameError::Encode)?;
        std::fs::write(path, content).map_err(|source| DameError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A pinned piece must belong to the side to move
fn check_pin(board: &Board, to_move: Player, pos: Position) -> Result<()> {
    match board.get(pos) {
        None => Err(DameError::InvalidPin { pos, reason: "empty square" }),
        Some(piece) if piece.owner() != to_move => Err(DameError::InvalidPin {
            pos,
            reason: "piece belongs to the side not on move",
        }),
        Some(_) => Ok(()),
    }
}
