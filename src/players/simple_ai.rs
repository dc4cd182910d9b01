//! Simple AI that picks the first available square.

use std::thread;
use std::time::Duration;

use strictly_tictactoe::{Board, Mark};
use tracing::{debug, instrument, warn};

use super::{MoveChoice, Player};
use crate::frontend::InputError;

/// Simple AI that picks the first empty cell in row-major order.
#[derive(Debug, Clone)]
pub struct SimpleAi {
    name: String,
    delay: Duration,
}

impl SimpleAi {
    /// Creates a new simple AI that pauses for `delay` before each move.
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

impl Player for SimpleAi {
    #[instrument(skip(self, board), fields(ai = %self.name))]
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Result<MoveChoice, InputError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        match board.first_free() {
            Some(position) => {
                debug!(%position, "AI chose position");
                Ok(MoveChoice::Play(position))
            }
            None => {
                warn!("Asked to move on a full board");
                Ok(MoveChoice::Quit)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::{Position, apply_move};

    #[test]
    fn test_picks_first_free_cell() {
        let mut ai = SimpleAi::new("bot", Duration::ZERO);
        let mut board = Board::new();
        assert_eq!(
            ai.choose_move(&board, Mark::X),
            Ok(MoveChoice::Play(Position::TopLeft))
        );

        apply_move(&mut board, Position::TopLeft, Mark::X);
        apply_move(&mut board, Position::TopCenter, Mark::O);
        assert_eq!(
            ai.choose_move(&board, Mark::X),
            Ok(MoveChoice::Play(Position::TopRight))
        );
    }
}
