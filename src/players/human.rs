//! Human player typing moves on a line-based terminal.

use std::io::{BufRead, Write};

use strictly_tictactoe::{Board, Mark};
use tracing::{debug, instrument, warn};

use super::{MoveChoice, Player};
use crate::frontend::{InputError, parse_move};

/// Reads one move per line from `input`, prompting on `prompt`.
///
/// End of input means the player quit.
#[derive(Debug)]
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    prompt: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: R, prompt: W) -> Self {
        Self {
            name: name.into(),
            input,
            prompt,
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    #[instrument(skip(self, _board), fields(player = %self.name))]
    fn choose_move(&mut self, _board: &Board, mark: Mark) -> Result<MoveChoice, InputError> {
        if let Err(e) = write!(self.prompt, "> ").and_then(|()| self.prompt.flush()) {
            warn!(error = %e, "Could not write prompt");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                debug!("Input closed, quitting");
                Ok(MoveChoice::Quit)
            }
            Ok(_) => parse_move(&line).map(MoveChoice::Play),
            Err(e) => {
                warn!(error = %e, "Could not read input, quitting");
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
    use std::io::Cursor;
    use strictly_tictactoe::Position;

    #[test]
    fn test_reads_one_move_per_line() {
        let input = Cursor::new("b2\n\nzz\n3a\n");
        let mut player = HumanPlayer::new("alice", input, Vec::new());
        let board = Board::new();

        assert_eq!(
            player.choose_move(&board, Mark::X),
            Ok(MoveChoice::Play(Position::Center))
        );
        assert_eq!(player.choose_move(&board, Mark::X), Err(InputError::Empty));
        assert_eq!(player.choose_move(&board, Mark::X), Err(InputError::Invalid));
        assert_eq!(
            player.choose_move(&board, Mark::X),
            Ok(MoveChoice::Play(Position::TopRight))
        );
        assert_eq!(player.choose_move(&board, Mark::X), Ok(MoveChoice::Quit));
        assert_eq!(player.prompt, b"> > > > > ");
    }
}
