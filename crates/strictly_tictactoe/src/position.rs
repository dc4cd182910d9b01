//! Board positions and their `(row, col)` coordinates.

use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A position on the tic-tac-toe board.
///
/// On the wire a position travels as its `[row, col]` pair, each in `0..=2`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(into = "(u8, u8)", try_from = "(u8, u8)")]
pub enum Position {
    /// Top-left (row 0, col 0)
    TopLeft,
    /// Top-center (row 0, col 1)
    TopCenter,
    /// Top-right (row 0, col 2)
    TopRight,
    /// Middle-left (row 1, col 0)
    MiddleLeft,
    /// Center (row 1, col 1)
    Center,
    /// Middle-right (row 1, col 2)
    MiddleRight,
    /// Bottom-left (row 2, col 0)
    BottomLeft,
    /// Bottom-center (row 2, col 1)
    BottomCenter,
    /// Bottom-right (row 2, col 2)
    BottomRight,
}

/// Coordinates that do not name a cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Coordinates ({}, {}) are off the board", row, col)]
pub struct PositionError {
    /// Requested row.
    pub row: u8,
    /// Requested column.
    pub col: u8,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from `(row, col)` coordinates.
    #[instrument]
    pub fn from_coords(row: u8, col: u8) -> Option<Self> {
        if row > 2 || col > 2 {
            return None;
        }
        Self::from_index(usize::from(row) * 3 + usize::from(col))
    }

    /// Row of this position (0 = top).
    pub fn row(self) -> u8 {
        (self.to_index() / 3) as u8
    }

    /// Column of this position (0 = left).
    pub fn col(self) -> u8 {
        (self.to_index() % 3) as u8
    }

    /// Filters positions by board state - returns only empty squares.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.row(), pos.col())
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = PositionError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Position::from_coords(row, col).ok_or(PositionError { row, col })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_coords_match_index() {
        for pos in Position::iter() {
            assert_eq!(Position::from_coords(pos.row(), pos.col()), Some(pos));
            assert_eq!(Position::from_index(pos.to_index()), Some(pos));
        }
    }

    #[test]
    fn test_off_board_coords() {
        assert_eq!(Position::from_coords(3, 0), None);
        assert_eq!(Position::from_coords(0, 3), None);
        assert_eq!(Position::from_index(9), None);
        assert_eq!(
            Position::try_from((1, 7)),
            Err(PositionError { row: 1, col: 7 })
        );
    }

    #[test]
    fn test_serializes_as_pair() {
        let json = serde_json::to_string(&Position::MiddleRight).unwrap();
        assert_eq!(json, "[1,2]");
        let back: Position = serde_json::from_str("[2,0]").unwrap();
        assert_eq!(back, Position::BottomLeft);
        assert!(serde_json::from_str::<Position>("[2,5]").is_err());
    }
}
