//! Board geometry and the 8x8 piece grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Player};

/// Board size (squares per side)
pub const BOARD_SIZE: i8 = 8;

/// Board coordinates, row 0 is Black's back rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Dark squares are the only playable ones. Off-board squares are neither.
    pub fn is_dark_square(&self) -> bool {
        self.is_valid() && (self.row + self.col) % 2 == 1
    }

    /// Step `distance` squares along a direction vector. Saturates at the
    /// `i8` range, so a step from off the board stays off the board.
    pub fn offset(&self, (dr, dc): (i8, i8), distance: i8) -> Position {
        let step = |from: i8, delta: i8| {
            let to = i16::from(from) + i16::from(delta) * i16::from(distance);
            to.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
        };
        Position::new(step(self.row, dr), step(self.col, dc))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Diagonal direction vectors (drow, dcol)
/// Index: 0=up-left, 1=up-right, 2=down-left, 3=down-right
pub const DIAGONALS: [(i8, i8); 4] = [
    (-1, -1), // up-left
    (-1, 1),  // up-right
    (1, -1),  // down-left
    (1, 1),   // down-right
];

/// The 8x8 grid. `None` is an empty square.
///
/// Pieces are plain values, so cloning a board never shares pieces with the
/// original.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Board with the standard starting position
    pub fn initial() -> Self {
        let mut board = Self::new();
        board.setup_initial_position();
        board
    }

    // ========================================================================
    // SQUARE ACCESS
    // ========================================================================

    /// Piece at `pos`, `None` for empty or off-board squares
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Place a piece; writes outside the board are ignored
    pub fn set(&mut self, pos: Position, piece: Piece) {
        if let Some(cell) = self.cell_mut(pos) {
            *cell = Some(piece);
        }
    }

    /// Clear a square, returning what was on it
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cell_mut(pos).and_then(Option::take)
    }

    /// Mutable access to an occupied square
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        self.cell_mut(pos).and_then(Option::as_mut)
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Option<Piece>> {
        if !pos.is_valid() {
            return None;
        }
        Some(&mut self.grid[pos.row as usize][pos.col as usize])
    }

    pub fn is_inside(&self, pos: Position) -> bool {
        pos.is_valid()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn is_dark_square(&self, pos: Position) -> bool {
        pos.is_dark_square()
    }

    /// Relocate whatever stands on `from` to `to`. No capture semantics.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        if let Some(piece) = self.remove(from) {
            self.set(to, piece);
        }
    }

    /// Remove every piece
    pub fn clear(&mut self) {
        self.grid = Default::default();
    }

    /// Iterate occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.map(|piece| (Position::new(r as i8, c as i8), piece))
            })
        })
    }

    // ========================================================================
    // COUNTS
    // ========================================================================

    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner() == player).count()
    }

    pub fn count_kings(&self, player: Player) -> usize {
        self.pieces()
            .filter(|(_, p)| p.owner() == player && p.is_king())
            .count()
    }

    pub fn count_men(&self, player: Player) -> usize {
        self.count_pieces(player) - self.count_kings(player)
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Clear the board, then fill the dark squares of rows 0-2 with Black men
    /// and rows 5-7 with White men
    pub fn setup_initial_position(&mut self) {
        self.clear();

        for row in 0..BOARD_SIZE {
            let owner = match row {
                0..=2 => Player::Black,
                5..=7 => Player::White,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if pos.is_dark_square() {
                    self.set(pos, Piece::man(owner));
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                let symbol = match self.get(pos) {
                    Some(piece) => piece.symbol(),
                    None if pos.is_dark_square() => '.',
                    None => ' ',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceType;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0, 0).is_valid());
        assert!(Position::new(7, 7).is_valid());
        assert!(!Position::new(-1, 3).is_valid());
        assert!(!Position::new(3, 8).is_valid());
    }

    #[test]
    fn test_dark_squares() {
        assert!(Position::new(0, 1).is_dark_square());
        assert!(Position::new(5, 0).is_dark_square());
        assert!(!Position::new(0, 0).is_dark_square());
        assert!(!Position::new(4, 4).is_dark_square());
    }

    #[test]
    fn test_initial_position() {
        let board = Board::initial();
        assert_eq!(board.count_pieces(Player::White), 12);
        assert_eq!(board.count_pieces(Player::Black), 12);
        assert_eq!(board.count_kings(Player::White), 0);

        for (pos, piece) in board.pieces() {
            assert!(pos.is_dark_square(), "{} is not dark", pos);
            match piece.owner() {
                Player::Black => assert!(pos.row <= 2),
                Player::White => assert!(pos.row >= 5),
            }
        }
        for col in 0..BOARD_SIZE {
            assert!(board.is_empty(Position::new(3, col)));
            assert!(board.is_empty(Position::new(4, col)));
        }
    }

    #[test]
    fn test_out_of_range_access_is_absorbed() {
        let mut board = Board::new();
        let outside = Position::new(8, 1);
        board.set(outside, Piece::man(Player::White));
        assert_eq!(board.get(outside), None);
        assert_eq!(board.remove(outside), None);
        assert_eq!(board.count_pieces(Player::White), 0);
    }

    #[test]
    fn test_far_off_board_predicates() {
        let board = Board::new();
        for pos in [
            Position::new(100, 100),
            Position::new(i8::MAX, i8::MAX),
            Position::new(i8::MIN, 3),
            Position::new(-1, 0),
        ] {
            assert!(!pos.is_valid());
            assert!(!pos.is_dark_square());
            assert!(!board.is_dark_square(pos));
            assert!(!board.is_inside(pos));
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_offset_saturates() {
        let corner = Position::new(i8::MAX, i8::MIN);
        assert_eq!(corner.offset((1, -1), 2), corner);
        assert_eq!(Position::new(120, 0).offset((1, 1), 2), Position::new(122, 2));
        assert_eq!(Position::new(5, 0).offset((-1, 1), 2), Position::new(3, 2));
    }

    #[test]
    fn test_move_piece_and_counts() {
        let mut board = Board::new();
        board.set(Position::new(5, 0), Piece::man(Player::White));
        board.set(Position::new(2, 1), Piece::new(Player::White, PieceType::King));

        board.move_piece(Position::new(5, 0), Position::new(4, 1));
        assert!(board.is_empty(Position::new(5, 0)));
        assert_eq!(board.get(Position::new(4, 1)), Some(Piece::man(Player::White)));
        assert_eq!(board.count_kings(Player::White), 1);
        assert_eq!(board.count_men(Player::White), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::initial();
        let copy = board.clone();
        if let Some(piece) = board.get_mut(Position::new(5, 0)) {
            piece.promote();
        }
        assert!(board.get(Position::new(5, 0)).is_some_and(|p| p.is_king()));
        assert!(copy.get(Position::new(5, 0)).is_some_and(|p| !p.is_king()));
    }
}
