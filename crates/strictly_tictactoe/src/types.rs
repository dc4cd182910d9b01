//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A player's mark on the board.
///
/// The peer that moves first always plays `X`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark of the first mover.
    X,
    /// Mark of the second mover.
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark of the peer that moves first or second.
    pub fn for_turn_order(moves_first: bool) -> Self {
        if moves_first { Mark::X } else { Mark::O }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Result of applying a single move to a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum MoveOutcome {
    /// The target cell was taken; the board is unchanged.
    #[display("rejected")]
    Rejected,
    /// The mark was placed and the game goes on.
    #[display("accepted")]
    Accepted,
    /// The mark completed a line for the given mark.
    #[display("{} wins", _0)]
    Win(Mark),
    /// The mark filled the last free cell without completing a line.
    #[display("draw")]
    Draw,
}

impl MoveOutcome {
    /// Returns true for outcomes that end the game.
    pub fn is_terminal(self) -> bool {
        matches!(self, MoveOutcome::Win(_) | MoveOutcome::Draw)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Squares only ever go from empty to occupied, and `free_cells` always
/// equals the number of empty squares. The only mutator is
/// [`apply_move`](crate::apply_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    /// Number of empty squares.
    free_cells: u8,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
            free_cells: 9,
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Number of empty squares left.
    pub fn free_cells(&self) -> u8 {
        self.free_cells
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the squares grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(3)
    }

    /// First empty square in row-major order.
    pub fn first_free(&self) -> Option<Position> {
        Position::valid_moves(self).into_iter().next()
    }

    /// Places a mark on an empty square.
    ///
    /// Returns false and leaves the board alone when the square is taken.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> bool {
        let square = &mut self.squares[pos.to_index()];
        if *square != Square::Empty {
            return false;
        }
        *square = Square::Occupied(mark);
        self.free_cells -= 1;
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.free_cells(), 9);
        assert!(Position::ALL.iter().all(|pos| board.is_empty(*pos)));
        assert_eq!(board.first_free(), Some(Position::TopLeft));
    }

    #[test]
    fn test_place_counts_free_cells() {
        let mut board = Board::new();
        assert!(board.place(Position::Center, Mark::X));
        assert!(!board.place(Position::Center, Mark::O));
        assert_eq!(board.get(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(board.free_cells(), 8);
    }

    #[test]
    fn test_rows_are_row_major() {
        let mut board = Board::new();
        board.place(Position::MiddleRight, Mark::O);
        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][2], Square::Occupied(Mark::O));
    }

    #[test]
    fn test_turn_order_marks() {
        assert_eq!(Mark::for_turn_order(true), Mark::X);
        assert_eq!(Mark::for_turn_order(false), Mark::O);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!MoveOutcome::Rejected.is_terminal());
        assert!(!MoveOutcome::Accepted.is_terminal());
        assert!(MoveOutcome::Win(Mark::O).is_terminal());
        assert!(MoveOutcome::Draw.is_terminal());
    }
}
