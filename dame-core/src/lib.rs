//! Dame Core - Ghanaian Dame rules engine
//!
//! This crate provides the core game logic for Ghanaian Dame (draughts):
//! - Board geometry (8x8, dark squares only)
//! - Move generation with mandatory capture, backward-capturing men and flying kings
//! - Turn state machine with promotion, multi-jump pinning and undo
//! - Best-of series scoring
//! - JSON encoding of persisted board state

pub mod board;
pub mod pieces;
pub mod moves;
pub mod calculator;
pub mod history;
pub mod game;
pub mod match_score;
pub mod session;
pub mod codec;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Position, BOARD_SIZE, DIAGONALS};
pub use pieces::{Piece, PieceType, Player};
pub use moves::Move;
pub use calculator::MoveCalculator;
pub use history::{GameHistory, GameSnapshot};
pub use game::{GameLogic, GameState, TurnOutcome};
pub use match_score::{MatchScore, TOTAL_GAMES, WINS_NEEDED};
pub use session::MatchSession;
pub use codec::{decode_board, decode_position, encode_board, encode_position, GameRecord};
pub use config::{MoveMatching, RuleConfig};
pub use error::{DameError, MoveError};
