//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Square};

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    debug_assert_eq!(
        usize::from(board.free_cells()),
        board.squares().iter().filter(|s| **s == Square::Empty).count(),
        "free-cell counter out of step with the squares"
    );
    board.free_cells() == 0
}

#[cfg(test)]
mod tests {
    use super::super::super::{Mark, MoveOutcome, Position, apply_move};
    use super::super::win::check_winner;
    use super::*;

    fn is_draw(board: &Board) -> bool {
        is_full(board) && check_winner(board).is_none()
    }

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        apply_move(&mut board, Position::Center, Mark::X);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_only_after_last_cell() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.into_iter().enumerate() {
            assert!(!is_full(&board), "full after {i} moves");
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            apply_move(&mut board, pos, mark);
        }
        assert!(is_full(&board));
        assert_eq!(board.free_cells(), 0);
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new();
        // X O X / O X X / O X O
        let moves = [
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::O),
            (Position::TopRight, Mark::X),
            (Position::MiddleLeft, Mark::O),
            (Position::Center, Mark::X),
            (Position::BottomRight, Mark::O),
            (Position::MiddleRight, Mark::X),
            (Position::BottomLeft, Mark::O),
            (Position::BottomCenter, Mark::X),
        ];
        let last = moves
            .iter()
            .map(|(pos, mark)| apply_move(&mut board, *pos, *mark))
            .last();

        assert_eq!(last, Some(MoveOutcome::Draw));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new();
        // X wins top row
        apply_move(&mut board, Position::TopLeft, Mark::X);
        apply_move(&mut board, Position::MiddleLeft, Mark::O);
        apply_move(&mut board, Position::TopCenter, Mark::X);
        apply_move(&mut board, Position::Center, Mark::O);
        apply_move(&mut board, Position::TopRight, Mark::X);

        assert!(!is_draw(&board));
    }
}
