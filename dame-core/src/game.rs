//! Game state machine: turns, move application, promotion, multi-jumps,
//! terminal detection and undo

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::calculator::MoveCalculator;
use crate::config::{MoveMatching, RuleConfig};
use crate::error::MoveError;
use crate::history::{GameHistory, GameSnapshot};
use crate::moves::Move;
use crate::pieces::Player;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }

    /// Terminal state crediting `player`
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::White => GameState::WhiteWins,
            Player::Black => GameState::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::WhiteWins => Some(Player::White),
            GameState::BlackWins => Some(Player::Black),
            GameState::InProgress | GameState::Draw => None,
        }
    }
}

/// What happened after a move was applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Turn passed to the opponent (or the game ended)
    TurnEnded,
    /// Same player must keep capturing with the piece on this square
    ContinueJump(Position),
}

impl TurnOutcome {
    pub fn turn_ended(self) -> bool {
        self == TurnOutcome::TurnEnded
    }
}

// ============================================================================
// GAME LOGIC
// ============================================================================

/// One game of Dame. Owned by a single session; callers serialize access.
#[derive(Clone, Debug)]
pub struct GameLogic {
    board: Board,
    current_player: Player,
    state: GameState,
    /// Piece pinned mid-turn by a forced continuation
    multi_jump: Option<Position>,
    history: GameHistory,
    rules: RuleConfig,
}

impl Default for GameLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLogic {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game from the standard position, White to move
    pub fn new() -> Self {
        Self::from_board(Board::initial())
    }

    /// New game from an arbitrary board, White to move
    pub fn from_board(board: Board) -> Self {
        Self::restore(board, Player::White, GameState::InProgress, None)
    }

    /// Rebuild a game from persisted state. History starts empty.
    pub fn restore(
        board: Board,
        current_player: Player,
        state: GameState,
        multi_jump: Option<Position>,
    ) -> Self {
        Self {
            board,
            current_player,
            state,
            multi_jump,
            history: GameHistory::new(),
            rules: RuleConfig::default(),
        }
    }

    /// Replace the rule configuration
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_in_multi_jump(&self) -> bool {
        self.multi_jump.is_some()
    }

    pub fn multi_jump_position(&self) -> Option<Position> {
        self.multi_jump
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn calculator(&self) -> MoveCalculator<'_> {
        MoveCalculator::new(&self.board)
    }

    // ========================================================================
    // MOVE QUERIES
    // ========================================================================

    /// Legal moves for the side to move
    pub fn valid_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        match self.multi_jump {
            Some(pinned) => self.calculator().capture_moves_from(pinned),
            None => self.calculator().valid_moves(self.current_player),
        }
    }

    /// Legal moves starting on `pos`. A capture anywhere on the board
    /// filters out this square's simple moves.
    pub fn valid_moves_for(&self, pos: Position) -> Vec<Move> {
        if self.is_game_over() || !self.is_own_piece(pos) {
            return Vec::new();
        }

        let calc = self.calculator();
        if let Some(pinned) = self.multi_jump {
            return if pinned == pos {
                calc.capture_moves_from(pinned)
            } else {
                Vec::new()
            };
        }

        let moves = calc.moves_for_position(pos);
        if calc.has_captures_available(self.current_player) {
            moves.into_iter().filter(Move::is_capture).collect()
        } else {
            moves
        }
    }

    pub fn is_own_piece(&self, pos: Position) -> bool {
        self.board
            .get(pos)
            .is_some_and(|piece| piece.owner() == self.current_player)
    }

    /// Whether the square may be picked up this turn
    pub fn can_select(&self, pos: Position) -> bool {
        if self.is_game_over() {
            return false;
        }
        match self.multi_jump {
            Some(pinned) => pinned == pos,
            None => self.is_own_piece(pos) && !self.valid_moves_for(pos).is_empty(),
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a requested move. Rejections leave the game untouched.
    pub fn apply_move(&mut self, requested: &Move) -> Result<TurnOutcome, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }

        let candidates = self.valid_moves_for(requested.start);
        let mv = self.resolve_move(requested, candidates)?;

        let snapshot = GameSnapshot::new(&self.board, self.current_player, self.state, self.multi_jump);
        let Some(mut piece) = self.board.remove(mv.start) else {
            return Err(MoveError::NoMatchingMove { start: mv.start, end: mv.end });
        };
        self.history.push(snapshot);

        for &captured in &mv.captures {
            self.board.remove(captured);
        }

        if !piece.is_king() && mv.end.row == piece.owner().promotion_row() {
            piece.promote();
            tracing::debug!(player = ?piece.owner(), square = %mv.end, "promoted to king");
        }
        self.board.set(mv.end, piece);

        tracing::debug!(player = ?self.current_player, mv = %mv, "applied move");

        // King sequences are generated complete; only men can be pinned
        if mv.is_capture() && !piece.is_king() {
            let continuations = self.calculator().capture_moves_from(mv.end);
            if !continuations.is_empty() {
                self.multi_jump = Some(mv.end);
                tracing::debug!(square = %mv.end, "multi-jump continues");
                return Ok(TurnOutcome::ContinueJump(mv.end));
            }
        }

        self.end_turn();
        Ok(TurnOutcome::TurnEnded)
    }

    fn resolve_move(&self, requested: &Move, candidates: Vec<Move>) -> Result<Move, MoveError> {
        let no_match = || MoveError::NoMatchingMove {
            start: requested.start,
            end: requested.end,
        };

        match self.rules.move_matching {
            MoveMatching::FirstMatch => candidates
                .into_iter()
                .find(|mv| mv.same_path(requested))
                .ok_or_else(no_match),
            MoveMatching::Strict if requested.is_capture() => candidates
                .into_iter()
                .find(|mv| mv == requested)
                .ok_or_else(no_match),
            MoveMatching::Strict => {
                let mut matching: Vec<Move> = candidates
                    .into_iter()
                    .filter(|mv| mv.same_path(requested))
                    .collect();
                match matching.len() {
                    0 => Err(no_match()),
                    1 => Ok(matching.remove(0)),
                    n => Err(MoveError::AmbiguousMove {
                        start: requested.start,
                        end: requested.end,
                        candidates: n,
                    }),
                }
            }
        }
    }

    fn end_turn(&mut self) {
        self.multi_jump = None;
        self.current_player = self.current_player.opponent();
        self.update_game_state();
    }

    fn update_game_state(&mut self) {
        let to_move = self.current_player;
        let white = self.board.count_pieces(Player::White);
        let black = self.board.count_pieces(Player::Black);

        if !self.calculator().has_valid_moves(to_move) {
            self.state = GameState::win_for(to_move.opponent());
        } else if white == 0 {
            self.state = GameState::BlackWins;
        } else if black == 0 {
            self.state = GameState::WhiteWins;
        } else if self.rules.king_vs_king_draw && self.is_lone_king_endgame() {
            self.state = GameState::Draw;
        }

        if self.state.is_over() {
            tracing::debug!(state = ?self.state, "game over");
        }
    }

    /// Exactly one piece per side and both are kings
    fn is_lone_king_endgame(&self) -> bool {
        [Player::White, Player::Black].into_iter().all(|player| {
            self.board.count_pieces(player) == 1 && self.board.count_kings(player) == 1
        })
    }

    // ========================================================================
    // GAME CONTROL
    // ========================================================================

    /// Back to the standard position, White to move, history cleared
    pub fn reset(&mut self) {
        self.board = Board::initial();
        self.current_player = Player::White;
        self.state = GameState::InProgress;
        self.multi_jump = None;
        self.history.clear();
        tracing::debug!("game reset");
    }

    /// Revert the most recent applied move
    pub fn undo(&mut self) -> Result<(), MoveError> {
        let snapshot = self.history.pop().ok_or(MoveError::NothingToUndo)?;

        self.board = snapshot.board().clone();
        self.current_player = snapshot.current_player();
        self.state = snapshot.state();
        self.multi_jump = snapshot.multi_jump();

        tracing::debug!(remaining = self.history.len(), "undid move");
        Ok(())
    }

    /// Human-readable turn/result line
    pub fn status_message(&self) -> String {
        match self.state {
            GameState::InProgress if self.is_in_multi_jump() => {
                format!("{} must continue jumping", self.current_player)
            }
            GameState::InProgress => format!("{}'s turn", self.current_player),
            GameState::WhiteWins => "White wins!".to_string(),
            GameState::BlackWins => "Black wins!".to_string(),
            GameState::Draw => "Draw!".to_string(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
