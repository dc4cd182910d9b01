//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. [`apply_move`] is the single entry
//! point both peers use, for their own moves and for the opponent's.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::winner_through;

use super::{Board, Mark, MoveOutcome, Position};
use tracing::{debug, instrument};

/// Places `mark` at `pos` and evaluates the result.
///
/// An occupied cell yields [`MoveOutcome::Rejected`] and leaves the board
/// untouched. Otherwise only the lines through `pos` are checked for a
/// win, then the free-cell count decides between a draw and a plain
/// accepted move.
#[instrument(skip(board), fields(free_cells = board.free_cells()))]
pub fn apply_move(board: &mut Board, pos: Position, mark: Mark) -> MoveOutcome {
    if !board.place(pos, mark) {
        debug!("Cell already taken");
        return MoveOutcome::Rejected;
    }

    let outcome = if let Some(winner) = winner_through(board, pos) {
        MoveOutcome::Win(winner)
    } else if is_full(board) {
        MoveOutcome::Draw
    } else {
        MoveOutcome::Accepted
    };
    debug!(%outcome, "Move applied");
    outcome
}
