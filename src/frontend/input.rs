//! Parsing typed moves such as `a1` or `3c`.

use derive_more::{Display, Error};
use strictly_tictactoe::Position;
use tracing::instrument;

/// A move the player has to retype.
///
/// These never leave the frontend: the player is shown the message and
/// asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Nothing but whitespace was entered.
    #[display("Please make a move.")]
    Empty,
    /// The text does not name a cell.
    #[display("Invalid move.")]
    Invalid,
    /// The cell already holds a mark.
    #[display("Cell already taken.")]
    CellTaken {
        /// The occupied cell.
        position: Position,
    },
}

/// Row from a letter `a..=c`.
fn row_of(byte: u8) -> Option<u8> {
    (b'a'..=b'c').contains(&byte).then(|| byte - b'a')
}

/// Column from a digit `1..=3`.
fn col_of(byte: u8) -> Option<u8> {
    (b'1'..=b'3').contains(&byte).then(|| byte - b'1')
}

/// Parses a move typed by the player.
///
/// Spaces are ignored. What remains must be exactly one row letter
/// (`a`, `b`, `c`) and one column digit (`1`, `2`, `3`), in either order.
#[instrument]
pub fn parse_move(input: &str) -> Result<Position, InputError> {
    let compact: Vec<u8> = input.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    let &[first, second] = compact.as_slice() else {
        return Err(if compact.is_empty() {
            InputError::Empty
        } else {
            InputError::Invalid
        });
    };

    let row = row_of(first).or_else(|| row_of(second));
    let col = col_of(first).or_else(|| col_of(second));
    match (row, col) {
        (Some(row), Some(col)) => Position::from_coords(row, col).ok_or(InputError::Invalid),
        _ => Err(InputError::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_then_digit() {
        assert_eq!(parse_move("a1"), Ok(Position::TopLeft));
        assert_eq!(parse_move("b2"), Ok(Position::Center));
        assert_eq!(parse_move("c3"), Ok(Position::BottomRight));
        assert_eq!(parse_move("a3"), Ok(Position::TopRight));
    }

    #[test]
    fn test_digit_then_letter() {
        assert_eq!(parse_move("1a"), Ok(Position::TopLeft));
        assert_eq!(parse_move("2c"), Ok(Position::BottomCenter));
    }

    #[test]
    fn test_spaces_are_ignored() {
        assert_eq!(parse_move(" b 1 "), Ok(Position::MiddleLeft));
        assert_eq!(parse_move("c2\n"), Ok(Position::BottomCenter));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_move(""), Err(InputError::Empty));
        assert_eq!(parse_move("   "), Err(InputError::Empty));
        assert_eq!(InputError::Empty.to_string(), "Please make a move.");
    }

    #[test]
    fn test_invalid_input() {
        for input in ["a", "a1b", "d1", "a4", "a0", "aa", "11", "A1", "xy"] {
            assert_eq!(parse_move(input), Err(InputError::Invalid), "input {input:?}");
        }
        assert_eq!(InputError::Invalid.to_string(), "Invalid move.");
    }
}
