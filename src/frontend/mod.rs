//! The local end of a duel: shows the game and collects moves.
//!
//! [`run_frontend`] runs on the caller's thread and reacts to the events
//! the session worker sends over the bridge. It never touches the
//! connection itself.

mod console;
mod input;

pub use console::ConsoleView;
pub use input::{InputError, parse_move};

use std::io;

use strictly_net::{FrontendEvent, FrontendHandle, GameResult, NetError, NetErrorKind, TurnMessage};
use strictly_tictactoe::{Board, Mark, MoveOutcome, apply_move};
use tracing::{debug, info, instrument, warn};

use crate::players::{MoveChoice, Player};

/// Status lines shown between boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Banner {
    /// We have to move.
    #[display("Your turn")]
    YourTurn,
    /// The opponent has to move.
    #[display("Waiting for opponent...")]
    WaitingForOpponent,
    /// We made the final move and the peer has to agree on the result.
    #[display("Waiting for game result confirmation with the peer...")]
    WaitingForConfirmation,
}

/// Where the game is shown.
pub trait View {
    /// Announces the start of the game.
    fn welcome(&mut self, mark: Mark) -> io::Result<()>;

    /// Draws the board from the point of view of `mark`.
    fn board(&mut self, board: &Board, mark: Mark) -> io::Result<()>;

    /// Shows a status line.
    fn banner(&mut self, banner: Banner) -> io::Result<()>;

    /// Shows the final result.
    fn result(&mut self, result: GameResult) -> io::Result<()>;

    /// Tells the player why a move was not taken.
    fn input_error(&mut self, err: &InputError) -> io::Result<()>;

    /// Reports the error that ended the session.
    fn fatal(&mut self, err: &NetError) -> io::Result<()>;
}

/// How the frontend stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Both sides agreed on this result.
    Finished(GameResult),
    /// The local player left before the end.
    Quit,
}

/// Serves bridge events until the game ends.
///
/// Returns [`Ending::Quit`] as soon as the player quits; dropping the
/// handle is what tells the session to abort. Session failures come back
/// as the error the session reported.
#[instrument(skip_all, fields(player = player.name(), mark = %frontend.mark()))]
pub fn run_frontend(
    frontend: FrontendHandle,
    player: &mut dyn Player,
    view: &mut dyn View,
) -> Result<Ending, NetError> {
    let mark = frontend.mark();
    view.welcome(mark)?;

    while let Some(event) = frontend.next_event() {
        match event {
            FrontendEvent::RequestMove { board, mark } => {
                view.banner(Banner::YourTurn)?;
                match pick_move(&board, mark, player, view)? {
                    Some(turn) => frontend.respond(turn)?,
                    None => {
                        info!("Player quit");
                        return Ok(Ending::Quit);
                    }
                }
            }
            FrontendEvent::WaitingForOpponent { board } => {
                view.board(&board, mark)?;
                view.banner(Banner::WaitingForOpponent)?;
            }
            FrontendEvent::WaitingForConfirmation { board } => {
                view.board(&board, mark)?;
                view.banner(Banner::WaitingForConfirmation)?;
            }
            FrontendEvent::Finished { board, result } => {
                view.board(&board, mark)?;
                view.result(result)?;
                info!(%result, "Game over");
                return Ok(Ending::Finished(result));
            }
            FrontendEvent::Error(err) => {
                if let Err(e) = view.fatal(&err) {
                    warn!(error = %e, "Could not show session error");
                }
                return Err(err);
            }
        }
    }

    // The worker always reports before hanging up unless it died.
    Err(NetError::new(NetErrorKind::WorkerPanicked))
}

/// Asks the player until they name a free cell or quit.
///
/// The move is tried on a copy of the board; the session replays it on
/// its own.
fn pick_move(
    board: &Board,
    mark: Mark,
    player: &mut dyn Player,
    view: &mut dyn View,
) -> Result<Option<TurnMessage>, NetError> {
    loop {
        view.board(board, mark)?;
        let position = match player.choose_move(board, mark) {
            Ok(MoveChoice::Play(position)) => position,
            Ok(MoveChoice::Quit) => return Ok(None),
            Err(err) => {
                debug!(error = %err, "Bad input");
                view.input_error(&err)?;
                continue;
            }
        };

        let mut snapshot = *board;
        let outcome = apply_move(&mut snapshot, position, mark);
        if outcome == MoveOutcome::Rejected {
            view.input_error(&InputError::CellTaken { position })?;
            continue;
        }
        debug!(%position, %outcome, "Move chosen");
        return Ok(Some(TurnMessage::new(position, outcome)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::ScriptedPlayer;
    use std::thread;
    use strictly_net::bridge;
    use strictly_tictactoe::Position;

    /// Records what would have been shown.
    #[derive(Default)]
    struct RecordingView {
        banners: Vec<Banner>,
        input_errors: Vec<InputError>,
        results: Vec<GameResult>,
        fatals: usize,
    }

    impl View for RecordingView {
        fn welcome(&mut self, _mark: Mark) -> io::Result<()> {
            Ok(())
        }
        fn board(&mut self, _board: &Board, _mark: Mark) -> io::Result<()> {
            Ok(())
        }
        fn banner(&mut self, banner: Banner) -> io::Result<()> {
            self.banners.push(banner);
            Ok(())
        }
        fn result(&mut self, result: GameResult) -> io::Result<()> {
            self.results.push(result);
            Ok(())
        }
        fn input_error(&mut self, err: &InputError) -> io::Result<()> {
            self.input_errors.push(*err);
            Ok(())
        }
        fn fatal(&mut self, _err: &NetError) -> io::Result<()> {
            self.fatals += 1;
            Ok(())
        }
    }

    /// Yields a fixed list of answers.
    struct Canned(Vec<Result<MoveChoice, InputError>>);

    impl Player for Canned {
        fn choose_move(&mut self, _board: &Board, _mark: Mark) -> Result<MoveChoice, InputError> {
            self.0.remove(0)
        }
        fn name(&self) -> &str {
            "canned"
        }
    }

    fn occupied_center() -> Board {
        let mut board = Board::new();
        apply_move(&mut board, Position::Center, Mark::O);
        board
    }

    #[test]
    fn test_retries_until_free_cell() {
        let (session, frontend) = bridge(Mark::X);
        let worker = thread::spawn(move || {
            let turn = session.request_move(occupied_center(), Mark::X).unwrap();
            assert_eq!(turn, TurnMessage::new(Position::TopLeft, MoveOutcome::Accepted));
            session
                .notify(FrontendEvent::Finished {
                    board: Board::new(),
                    result: GameResult::Draw,
                })
                .unwrap();
        });

        let mut player = Canned(vec![
            Err(InputError::Empty),
            Ok(MoveChoice::Play(Position::Center)),
            Ok(MoveChoice::Play(Position::TopLeft)),
        ]);
        let mut view = RecordingView::default();
        let ending = run_frontend(frontend, &mut player, &mut view).unwrap();
        worker.join().unwrap();

        assert_eq!(ending, Ending::Finished(GameResult::Draw));
        assert_eq!(
            view.input_errors,
            vec![
                InputError::Empty,
                InputError::CellTaken {
                    position: Position::Center
                }
            ]
        );
        assert_eq!(view.banners, vec![Banner::YourTurn]);
        assert_eq!(view.results, vec![GameResult::Draw]);
    }

    #[test]
    fn test_quit_drops_handle() {
        let (session, frontend) = bridge(Mark::O);
        let worker = thread::spawn(move || session.request_move(Board::new(), Mark::O));

        let mut player = ScriptedPlayer::new("nobody", Vec::<Position>::new());
        let mut view = RecordingView::default();
        let ending = run_frontend(frontend, &mut player, &mut view).unwrap();

        assert_eq!(ending, Ending::Quit);
        assert_eq!(
            worker.join().unwrap().unwrap_err().kind,
            NetErrorKind::FrontendGone
        );
    }

    #[test]
    fn test_session_error_is_returned() {
        let (session, frontend) = bridge(Mark::X);
        let worker = thread::spawn(move || {
            session
                .notify(FrontendEvent::WaitingForOpponent {
                    board: Board::new(),
                })
                .unwrap();
            session
                .notify(FrontendEvent::Error(NetError::new(
                    NetErrorKind::ConnectionClosed,
                )))
                .unwrap();
        });

        let mut player = ScriptedPlayer::new("unused", [Position::Center]);
        let mut view = RecordingView::default();
        let err = run_frontend(frontend, &mut player, &mut view).unwrap_err();
        worker.join().unwrap();

        assert_eq!(err.kind, NetErrorKind::ConnectionClosed);
        assert_eq!(view.banners, vec![Banner::WaitingForOpponent]);
        assert_eq!(view.fatals, 1);
    }

    #[test]
    fn test_silent_hangup_is_an_error() {
        let (session, frontend) = bridge(Mark::X);
        drop(session);

        let mut player = ScriptedPlayer::new("unused", Vec::<Position>::new());
        let mut view = RecordingView::default();
        let err = run_frontend(frontend, &mut player, &mut view).unwrap_err();
        assert_eq!(err.kind, NetErrorKind::WorkerPanicked);
    }
}
