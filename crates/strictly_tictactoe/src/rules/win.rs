//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use tracing::instrument;

/// Every winning line: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the mark owning `line`, if all three squares hold it.
fn line_owner(board: &Board, [a, b, c]: [Position; 3]) -> Option<Mark> {
    match board.get(a) {
        Square::Occupied(mark)
            if board.get(b) == Square::Occupied(mark) && board.get(c) == Square::Occupied(mark) =>
        {
            Some(mark)
        }
        _ => None,
    }
}

/// Scans every line for a winner.
#[cfg(test)]
pub(crate) fn check_winner(board: &Board) -> Option<Mark> {
    LINES.into_iter().find_map(|line| line_owner(board, line))
}

/// Checks only the lines passing through `pos`.
///
/// This is what a freshly placed mark can have changed: its row, its
/// column, and the diagonals when `pos` sits on one.
#[instrument(skip(board))]
pub fn winner_through(board: &Board, pos: Position) -> Option<Mark> {
    LINES
        .into_iter()
        .filter(|line| line.contains(&pos))
        .find_map(|line| line_owner(board, line))
}
