//! Undo history

use crate::board::{Board, Position};
use crate::game::GameState;
use crate::pieces::Player;

/// Game state captured just before a move was applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    board: Board,
    current_player: Player,
    state: GameState,
    multi_jump: Option<Position>,
}

impl GameSnapshot {
    /// Copies the board, so later mutation of the live board cannot leak in
    pub fn new(
        board: &Board,
        current_player: Player,
        state: GameState,
        multi_jump: Option<Position>,
    ) -> Self {
        Self {
            board: board.clone(),
            current_player,
            state,
            multi_jump,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn multi_jump(&self) -> Option<Position> {
        self.multi_jump
    }
}

/// LIFO stack of snapshots, one per applied move
#[derive(Clone, Debug, Default)]
pub struct GameHistory {
    snapshots: Vec<GameSnapshot>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<GameSnapshot> {
        self.snapshots.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut history = GameHistory::new();
        assert!(!history.can_undo());
        assert!(history.pop().is_none());

        let board = Board::initial();
        history.push(GameSnapshot::new(&board, Player::White, GameState::InProgress, None));
        history.push(GameSnapshot::new(
            &board,
            Player::Black,
            GameState::InProgress,
            Some(Position::new(3, 2)),
        ));
        assert_eq!(history.len(), 2);

        let last = history.pop().unwrap();
        assert_eq!(last.current_player(), Player::Black);
        assert_eq!(last.multi_jump(), Some(Position::new(3, 2)));
        assert_eq!(history.pop().unwrap().current_player(), Player::White);
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated_from_live_board() {
        let mut board = Board::initial();
        let snapshot = GameSnapshot::new(&board, Player::White, GameState::InProgress, None);
        board.clear();
        assert_eq!(snapshot.board().count_pieces(Player::White), 12);
    }

    #[test]
    fn test_clear() {
        let mut history = GameHistory::new();
        history.push(GameSnapshot::new(&Board::new(), Player::White, GameState::InProgress, None));
        history.clear();
        assert!(!history.can_undo());
    }
}
