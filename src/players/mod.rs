//! Player trait and implementations.

mod human;
mod scripted;
mod simple_ai;

pub use human::HumanPlayer;
pub use scripted::ScriptedPlayer;
pub use simple_ai::SimpleAi;

use strictly_tictactoe::{Board, Mark, Position};

use crate::frontend::InputError;

/// What a player decided to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    /// Put our mark on this cell.
    Play(Position),
    /// Leave the game.
    Quit,
}

/// Anything that can pick moves for the local side.
pub trait Player {
    /// Picks a move on `board` for `mark`.
    ///
    /// An [`InputError`] means "ask again"; it never ends the game.
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Result<MoveChoice, InputError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
