//! Player that follows a fixed list of moves.

use strictly_tictactoe::{Board, Mark, Position};
use tracing::{debug, instrument};

use super::{MoveChoice, Player};
use crate::frontend::InputError;

/// Plays the first position of its script that is still free.
///
/// Quits once every scripted cell is taken.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    name: String,
    script: Vec<Position>,
}

impl ScriptedPlayer {
    /// Creates a player for `script`.
    pub fn new(name: impl Into<String>, script: impl IntoIterator<Item = Position>) -> Self {
        Self {
            name: name.into(),
            script: script.into_iter().collect(),
        }
    }
}

impl Player for ScriptedPlayer {
    #[instrument(skip(self, board), fields(player = %self.name))]
    fn choose_move(&mut self, board: &Board, mark: Mark) -> Result<MoveChoice, InputError> {
        let choice = self
            .script
            .iter()
            .copied()
            .find(|&pos| board.is_empty(pos))
            .map_or(MoveChoice::Quit, MoveChoice::Play);
        debug!(?choice, "Scripted choice");
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::apply_move;

    #[test]
    fn test_skips_taken_cells() {
        let mut player = ScriptedPlayer::new("script", [Position::Center, Position::TopLeft]);
        let mut board = Board::new();
        apply_move(&mut board, Position::Center, Mark::O);

        assert_eq!(
            player.choose_move(&board, Mark::X),
            Ok(MoveChoice::Play(Position::TopLeft))
        );
    }

    #[test]
    fn test_quits_when_script_runs_out() {
        let mut player = ScriptedPlayer::new("script", [Position::Center]);
        let mut board = Board::new();
        apply_move(&mut board, Position::Center, Mark::O);

        assert_eq!(player.choose_move(&board, Mark::X), Ok(MoveChoice::Quit));
    }
}
