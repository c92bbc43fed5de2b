//! Legal move generation
//!
//! Ghanaian Dame rules:
//! - Mandatory capture: if any capture exists, only captures are legal
//! - Free choice: any complete capture sequence may be played, not only the longest
//! - Men step one square forward but capture in all four diagonal directions
//! - Flying kings move and capture any distance along a diagonal
//!
//! Capture sequences are searched recursively. Every hop is made on a fresh
//! copy of the working board, so sibling branches never see each other's
//! removals. A branch becomes a `Move` once no further capture exists from
//! its landing square.

use rustc_hash::FxHashSet;

use crate::board::{Board, Position, DIAGONALS};
use crate::moves::Move;
use crate::pieces::{Piece, Player};

/// Move generator bound to one board
#[derive(Clone, Copy, Debug)]
pub struct MoveCalculator<'a> {
    board: &'a Board,
}

impl<'a> MoveCalculator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    // ========================================================================
    // PLAYER-WIDE QUERIES
    // ========================================================================

    /// All legal moves for `player`. Captures only when any exist.
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        let mut simple = Vec::new();
        let mut captures = Vec::new();

        for (pos, piece) in self.board.pieces() {
            if piece.owner() != player {
                continue;
            }
            for mv in self.moves_for_piece(pos, piece) {
                if mv.is_capture() {
                    captures.push(mv);
                } else {
                    simple.push(mv);
                }
            }
        }

        tracing::trace!(
            ?player,
            captures = captures.len(),
            simple = simple.len(),
            "generated moves"
        );

        if captures.is_empty() {
            simple
        } else {
            captures
        }
    }

    pub fn has_valid_moves(&self, player: Player) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.owner() == player)
            .any(|(pos, piece)| !self.moves_for_piece(pos, piece).is_empty())
    }

    pub fn has_captures_available(&self, player: Player) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.owner() == player)
            .any(|(pos, piece)| self.moves_for_piece(pos, piece).iter().any(Move::is_capture))
    }

    // ========================================================================
    // PER-PIECE QUERIES
    // ========================================================================

    /// Moves for one piece. A piece with a capture never gets simple moves.
    pub fn moves_for_piece(&self, pos: Position, piece: Piece) -> Vec<Move> {
        if piece.is_king() {
            let captures = self.king_captures(pos, piece);
            if captures.is_empty() {
                self.king_simple_moves(pos)
            } else {
                captures
            }
        } else {
            let captures = self.man_captures(pos, piece);
            if captures.is_empty() {
                self.man_simple_moves(pos, piece)
            } else {
                captures
            }
        }
    }

    /// Moves for whatever piece stands on `pos`
    pub fn moves_for_position(&self, pos: Position) -> Vec<Move> {
        match self.board.get(pos) {
            Some(piece) => self.moves_for_piece(pos, piece),
            None => Vec::new(),
        }
    }

    /// Capture sequences for the piece on `pos` (multi-jump continuation)
    pub fn capture_moves_from(&self, pos: Position) -> Vec<Move> {
        self.moves_for_position(pos)
            .into_iter()
            .filter(Move::is_capture)
            .collect()
    }

    // ========================================================================
    // MEN
    // ========================================================================

    fn man_simple_moves(&self, pos: Position, piece: Piece) -> Vec<Move> {
        let forward = piece.owner().forward();
        [(forward, -1), (forward, 1)]
            .into_iter()
            .map(|dir| pos.offset(dir, 1))
            .filter(|&dest| self.board.is_inside(dest) && self.board.is_empty(dest))
            .map(|dest| Move::simple(pos, dest))
            .collect()
    }

    fn man_captures(&self, pos: Position, piece: Piece) -> Vec<Move> {
        let mut found = Vec::new();
        search_man_captures(self.board, pos, piece.owner(), &CaptureChain::new(pos), &mut found);
        found
    }

    // ========================================================================
    // KINGS
    // ========================================================================

    /// Flying king: every empty square up to the first obstruction
    fn king_simple_moves(&self, pos: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        for dir in DIAGONALS {
            let mut dest = pos.offset(dir, 1);
            while self.board.is_inside(dest) && self.board.is_empty(dest) {
                moves.push(Move::simple(pos, dest));
                dest = dest.offset(dir, 1);
            }
        }
        moves
    }

    fn king_captures(&self, pos: Position, piece: Piece) -> Vec<Move> {
        let mut found = Vec::new();
        search_king_captures(self.board, pos, piece.owner(), &CaptureChain::new(pos), &mut found);
        dedup_moves(found)
    }
}

// ============================================================================
// RECURSIVE CAPTURE SEARCH
// ============================================================================

/// Captures made so far along one search branch
#[derive(Clone, Debug)]
struct CaptureChain {
    origin: Position,
    taken: Vec<Position>,
    seen: FxHashSet<Position>,
}

impl CaptureChain {
    fn new(origin: Position) -> Self {
        Self {
            origin,
            taken: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn contains(&self, pos: Position) -> bool {
        self.seen.contains(&pos)
    }

    fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    fn with(&self, pos: Position) -> Self {
        let mut next = self.clone();
        next.taken.push(pos);
        next.seen.insert(pos);
        next
    }

    fn to_move(&self, end: Position) -> Move {
        Move::capture(self.origin, end, self.taken.clone())
    }
}

/// Working copy after one hop: enemy removed, piece relocated
fn board_after_hop(board: &Board, from: Position, captured: Position, landing: Position) -> Board {
    let mut next = board.clone();
    next.remove(captured);
    next.move_piece(from, landing);
    next
}

fn search_man_captures(
    board: &Board,
    pos: Position,
    owner: Player,
    chain: &CaptureChain,
    found: &mut Vec<Move>,
) {
    let mut extended = false;

    for dir in DIAGONALS {
        let mid = pos.offset(dir, 1);
        let landing = pos.offset(dir, 2);

        if !board.is_inside(landing) || !board.is_empty(landing) || chain.contains(mid) {
            continue;
        }
        let is_enemy = board.get(mid).is_some_and(|p| p.owner() != owner);
        if !is_enemy {
            continue;
        }

        extended = true;
        let next = board_after_hop(board, pos, mid, landing);
        search_man_captures(&next, landing, owner, &chain.with(mid), found);
    }

    if !extended && !chain.is_empty() {
        found.push(chain.to_move(pos));
    }
}

fn search_king_captures(
    board: &Board,
    pos: Position,
    owner: Player,
    chain: &CaptureChain,
    found: &mut Vec<Move>,
) {
    let mut extended = false;

    for dir in DIAGONALS {
        // First occupied square along this diagonal; anything behind it is shielded
        let mut scan = pos.offset(dir, 1);
        while board.is_inside(scan) && board.is_empty(scan) {
            scan = scan.offset(dir, 1);
        }
        let Some(target) = board.get(scan) else {
            continue;
        };
        if target.owner() == owner || chain.contains(scan) {
            continue;
        }

        let mut landing = scan.offset(dir, 1);
        while board.is_inside(landing) && board.is_empty(landing) {
            extended = true;
            let next = board_after_hop(board, pos, scan, landing);
            search_king_captures(&next, landing, owner, &chain.with(scan), found);
            landing = landing.offset(dir, 1);
        }
    }

    if !extended && !chain.is_empty() {
        found.push(chain.to_move(pos));
    }
}

/// Drop repeated sequences (different landing squares can converge on the
/// same complete move), keeping first-seen order
fn dedup_moves(moves: Vec<Move>) -> Vec<Move> {
    let mut seen = FxHashSet::default();
    moves.into_iter().filter(|mv| seen.insert(mv.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn ends(moves: &[Move]) -> Vec<Position> {
        moves.iter().map(|m| m.end).collect()
    }

    #[test]
    fn test_far_off_board_piece_has_no_moves() {
        let board = Board::new();
        let calc = MoveCalculator::new(&board);
        for pos in [p(i8::MAX, i8::MAX), p(i8::MIN, i8::MIN), p(100, 3)] {
            assert!(calc.moves_for_piece(pos, Piece::man(Player::White)).is_empty());
            assert!(calc.moves_for_piece(pos, Piece::king(Player::Black)).is_empty());
            assert!(calc.moves_for_position(pos).is_empty());
        }
    }

    #[test]
    fn test_initial_white_moves() {
        let board = Board::initial();
        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        // Only the row-5 men can advance: (5,0)->1, (5,2)->2, (5,4)->2, (5,6)->2
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_capture() && m.start.row == 5 && m.end.row == 4));
    }

    #[test]
    fn test_man_moves_forward_only() {
        let mut board = Board::new();
        board.set(p(3, 2), Piece::man(Player::Black));
        let moves = MoveCalculator::new(&board).valid_moves(Player::Black);
        let mut dests = ends(&moves);
        dests.sort();
        assert_eq!(dests, vec![p(4, 1), p(4, 3)]);
    }

    #[test]
    fn test_man_captures_backward() {
        let mut board = Board::new();
        board.set(p(4, 3), Piece::man(Player::White));
        board.set(p(5, 4), Piece::man(Player::Black));
        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        assert_eq!(moves, vec![Move::capture(p(4, 3), p(6, 5), vec![p(5, 4)])]);
    }

    #[test]
    fn test_man_double_jump() {
        let mut board = Board::new();
        board.set(p(5, 0), Piece::man(Player::White));
        board.set(p(4, 1), Piece::man(Player::Black));
        board.set(p(2, 3), Piece::man(Player::Black));

        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        assert_eq!(
            moves,
            vec![Move::capture(p(5, 0), p(1, 4), vec![p(4, 1), p(2, 3)])]
        );
    }

    #[test]
    fn test_free_choice_keeps_branches_of_different_length() {
        // From (5,2): left branch takes one piece, right branch takes two
        let mut board = Board::new();
        board.set(p(5, 2), Piece::man(Player::White));
        board.set(p(4, 1), Piece::man(Player::Black));
        board.set(p(4, 3), Piece::man(Player::Black));
        board.set(p(2, 5), Piece::man(Player::Black));

        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        assert!(moves.contains(&Move::capture(p(5, 2), p(3, 0), vec![p(4, 1)])));
        assert!(moves.contains(&Move::capture(p(5, 2), p(1, 6), vec![p(4, 3), p(2, 5)])));
        assert!(moves.iter().all(Move::is_capture));
    }

    #[test]
    fn test_mandatory_capture_filters_other_pieces() {
        let mut board = Board::new();
        board.set(p(5, 0), Piece::man(Player::White));
        board.set(p(4, 1), Piece::man(Player::Black));
        board.set(p(6, 5), Piece::man(Player::White));

        let calc = MoveCalculator::new(&board);
        assert!(calc.has_captures_available(Player::White));
        let moves = calc.valid_moves(Player::White);
        assert!(moves.iter().all(Move::is_capture));
        // The free piece still has simple moves when asked directly
        assert_eq!(calc.moves_for_position(p(6, 5)).len(), 2);
    }

    #[test]
    fn test_flying_king_on_empty_board() {
        let mut board = Board::new();
        board.set(p(4, 4), Piece::king(Player::White));
        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        let dests = ends(&moves);
        assert_eq!(moves.len(), 13);
        assert!(dests.contains(&p(0, 0)));
        assert!(dests.contains(&p(7, 7)));
        assert!(dests.contains(&p(1, 7)));
        assert!(dests.contains(&p(7, 1)));
    }

    #[test]
    fn test_king_blocked_by_own_piece() {
        let mut board = Board::new();
        board.set(p(4, 4), Piece::king(Player::White));
        board.set(p(2, 2), Piece::man(Player::White));
        let calc = MoveCalculator::new(&board);
        let dests = ends(&calc.moves_for_position(p(4, 4)));
        assert!(dests.contains(&p(3, 3)));
        assert!(!dests.contains(&p(1, 1)));
        assert!(!dests.contains(&p(0, 0)));
    }

    #[test]
    fn test_king_captures_from_distance() {
        let mut board = Board::new();
        board.set(p(7, 0), Piece::king(Player::White));
        board.set(p(4, 3), Piece::man(Player::Black));

        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        assert!(moves.iter().all(Move::is_capture));
        let mut dests = ends(&moves);
        dests.sort();
        assert_eq!(dests, vec![p(0, 7), p(1, 6), p(2, 5), p(3, 4)]);
        assert!(moves.iter().all(|m| m.start == p(7, 0) && m.captures == vec![p(4, 3)]));
    }

    #[test]
    fn test_king_multi_capture_keeps_original_start() {
        let mut board = Board::new();
        board.set(p(7, 0), Piece::king(Player::White));
        board.set(p(5, 2), Piece::man(Player::Black));
        board.set(p(2, 5), Piece::man(Player::Black));

        let moves = MoveCalculator::new(&board).valid_moves(Player::White);
        let doubles: Vec<_> = moves.iter().filter(|m| m.capture_count() == 2).collect();
        assert!(!doubles.is_empty());
        assert!(doubles.iter().all(|m| m.start == p(7, 0)));
        assert!(doubles.iter().any(|m| m.end == p(0, 7)));
        // Converging paths through (4,3) and (3,4) collapse to one option each
        let to_corner = doubles.iter().filter(|m| m.end == p(0, 7)).count();
        assert_eq!(to_corner, 1);
    }

    #[test]
    fn test_king_cannot_capture_behind_screen() {
        let mut board = Board::new();
        board.set(p(7, 0), Piece::king(Player::White));
        board.set(p(5, 2), Piece::man(Player::White));
        board.set(p(4, 3), Piece::man(Player::Black));
        let calc = MoveCalculator::new(&board);
        assert!(calc.capture_moves_from(p(7, 0)).is_empty());

        // Two enemies back to back shield each other as well
        let mut board = Board::new();
        board.set(p(7, 0), Piece::king(Player::White));
        board.set(p(5, 2), Piece::man(Player::Black));
        board.set(p(4, 3), Piece::man(Player::Black));
        assert!(MoveCalculator::new(&board).capture_moves_from(p(7, 0)).is_empty());
    }

    #[test]
    fn test_boxed_in_piece_has_no_moves() {
        let mut board = Board::new();
        board.set(p(2, 1), Piece::man(Player::Black));
        for sq in [p(1, 0), p(1, 2), p(3, 0), p(3, 2), p(0, 3), p(4, 3)] {
            board.set(sq, Piece::man(Player::White));
        }
        let calc = MoveCalculator::new(&board);
        assert!(calc.valid_moves(Player::Black).is_empty());
        assert!(!calc.has_valid_moves(Player::Black));
    }
}
