//! Line-oriented console rendering.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};
use strictly_net::{GameResult, NetError};
use strictly_tictactoe::{Board, Mark, Square};

use super::{Banner, InputError, View};

fn attribute(attribute: Attribute) -> ContentStyle {
    ContentStyle {
        attributes: attribute.into(),
        ..ContentStyle::new()
    }
}

fn colors(foreground: Option<Color>, background: Option<Color>) -> ContentStyle {
    ContentStyle {
        foreground_color: foreground,
        background_color: background,
        ..ContentStyle::new()
    }
}

/// Draws the board and messages as plain lines on `out`.
///
/// With color on, our marks are shown reversed and the opponent's on red.
#[derive(Debug)]
pub struct ConsoleView<W> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint<'a>(&self, text: &'a str, style: ContentStyle) -> StyledContent<&'a str> {
        let style = if self.color { style } else { ContentStyle::new() };
        StyledContent::new(style, text)
    }

    fn cell(&self, square: Square, mark: Mark) -> String {
        match square {
            Square::Empty => "[ ]".to_string(),
            Square::Occupied(owner) => {
                let text = format!("[{owner}]");
                let style = if owner == mark {
                    attribute(Attribute::Reverse)
                } else {
                    colors(None, Some(Color::Red))
                };
                self.paint(&text, style).to_string()
            }
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn welcome(&mut self, mark: Mark) -> io::Result<()> {
        let started = self.paint("Game started", attribute(Attribute::Reverse));
        writeln!(self.out, "\n*** {started} ***")?;
        writeln!(self.out, "You play {mark}.")
    }

    fn board(&mut self, board: &Board, mark: Mark) -> io::Result<()> {
        let mut text = String::from("\n   1   2   3\n");
        for (label, row) in ['a', 'b', 'c'].into_iter().zip(board.rows()) {
            let cells: Vec<String> = row.iter().map(|&sq| self.cell(sq, mark)).collect();
            text.push_str(&format!("{label} {}\n", cells.join(" ")));
        }
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    fn banner(&mut self, banner: Banner) -> io::Result<()> {
        match banner {
            Banner::YourTurn => {
                let text = banner.to_string();
                let line = self.paint(&text, attribute(Attribute::Bold));
                writeln!(self.out, "\n<<< {line} >>>")?;
            }
            Banner::WaitingForOpponent | Banner::WaitingForConfirmation => {
                writeln!(self.out, "{banner}")?;
            }
        }
        self.out.flush()
    }

    fn result(&mut self, result: GameResult) -> io::Result<()> {
        let (text, style) = match result {
            GameResult::LocalWin => ("You win!", colors(Some(Color::Black), Some(Color::Green))),
            GameResult::RemoteWin => ("You lose!", colors(Some(Color::Black), Some(Color::Red))),
            GameResult::Draw => ("It's a draw", attribute(Attribute::Reverse)),
        };
        let line = self.paint(text, style);
        writeln!(self.out, "\n*** {line} ***")?;
        self.out.flush()
    }

    fn input_error(&mut self, err: &InputError) -> io::Result<()> {
        let text = err.to_string();
        let line = self.paint(&text, colors(Some(Color::Red), None));
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    fn fatal(&mut self, err: &NetError) -> io::Result<()> {
        let text = err.kind().to_string();
        let line = self.paint(&text, colors(Some(Color::Red), None));
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_net::NetErrorKind;
    use strictly_tictactoe::{Position, apply_move};

    fn plain() -> ConsoleView<Vec<u8>> {
        ConsoleView::new(Vec::new(), false)
    }

    fn text(view: ConsoleView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_board_layout() {
        let mut board = Board::new();
        apply_move(&mut board, Position::TopLeft, Mark::X);
        apply_move(&mut board, Position::Center, Mark::O);
        apply_move(&mut board, Position::BottomRight, Mark::X);

        let mut view = plain();
        view.board(&board, Mark::X).unwrap();
        assert_eq!(
            text(view),
            "\n   1   2   3\na [X] [ ] [ ]\nb [ ] [O] [ ]\nc [ ] [ ] [X]\n"
        );
    }

    #[test]
    fn test_banners() {
        let mut view = plain();
        view.banner(Banner::YourTurn).unwrap();
        view.banner(Banner::WaitingForOpponent).unwrap();
        view.banner(Banner::WaitingForConfirmation).unwrap();
        assert_eq!(
            text(view),
            "\n<<< Your turn >>>\nWaiting for opponent...\n\
             Waiting for game result confirmation with the peer...\n"
        );
    }

    #[test]
    fn test_results() {
        let mut view = plain();
        view.result(GameResult::LocalWin).unwrap();
        view.result(GameResult::RemoteWin).unwrap();
        view.result(GameResult::Draw).unwrap();
        assert_eq!(
            text(view),
            "\n*** You win! ***\n\n*** You lose! ***\n\n*** It's a draw ***\n"
        );
    }

    #[test]
    fn test_errors_show_message_only() {
        let mut view = plain();
        view.input_error(&InputError::Invalid).unwrap();
        view.fatal(&NetError::new(NetErrorKind::ConnectionClosed))
            .unwrap();
        let out = text(view);
        assert!(out.starts_with("Invalid move.\n"));
        assert!(!out.contains(".rs:"), "location must not reach the player: {out}");
    }

    #[test]
    fn test_color_marks_cells() {
        let mut board = Board::new();
        apply_move(&mut board, Position::TopLeft, Mark::X);
        apply_move(&mut board, Position::Center, Mark::O);

        let mut view = ConsoleView::new(Vec::new(), true);
        view.board(&board, Mark::X).unwrap();
        let out = text(view);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("[X]"));
        assert!(out.contains("[O]"));
    }
}
