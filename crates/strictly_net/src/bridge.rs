//! Channel pair between the session worker and the frontend.
//!
//! Events flow one way over a rendezvous channel: `notify` returns only
//! once the frontend has picked the event up. `RequestMove` is the one
//! event that expects an answer, which comes back over a single-slot
//! response channel. At most one request is ever outstanding.

use std::sync::mpsc::{self, Receiver, SyncSender};

use strictly_tictactoe::{Board, Mark};
use tracing::{debug, instrument};

use crate::error::{NetError, NetErrorKind};
use crate::message::TurnMessage;
use crate::session::GameResult;

/// Something the frontend should show or answer.
///
/// Boards are copies; the session keeps the authoritative one.
#[derive(Debug, Clone)]
pub enum FrontendEvent {
    /// Our turn: answer with a move via [`FrontendHandle::respond`].
    RequestMove {
        /// Board before the move.
        board: Board,
        /// Mark to play.
        mark: Mark,
    },
    /// The opponent is thinking.
    WaitingForOpponent {
        /// Board the opponent is looking at.
        board: Board,
    },
    /// We made the final move; waiting for the peer to confirm the result.
    WaitingForConfirmation {
        /// Final board.
        board: Board,
    },
    /// Both sides agreed on the result.
    Finished {
        /// Final board.
        board: Board,
        /// Result from our point of view.
        result: GameResult,
    },
    /// The session failed and has ended.
    Error(NetError),
}

/// Session-side end of the bridge.
#[derive(Debug)]
pub struct SessionBridge {
    events: SyncSender<FrontendEvent>,
    moves: Receiver<TurnMessage>,
}

/// Frontend-side end of the bridge.
#[derive(Debug)]
pub struct FrontendHandle {
    events: Receiver<FrontendEvent>,
    moves: SyncSender<TurnMessage>,
    mark: Mark,
}

/// Creates a connected bridge pair for the player holding `mark`.
pub fn bridge(mark: Mark) -> (SessionBridge, FrontendHandle) {
    let (event_tx, event_rx) = mpsc::sync_channel(0);
    let (move_tx, move_rx) = mpsc::sync_channel(1);
    (
        SessionBridge {
            events: event_tx,
            moves: move_rx,
        },
        FrontendHandle {
            events: event_rx,
            moves: move_tx,
            mark,
        },
    )
}

impl SessionBridge {
    /// Hands an event to the frontend, blocking until it is taken.
    pub fn notify(&self, event: FrontendEvent) -> Result<(), NetError> {
        self.events
            .send(event)
            .map_err(|_| NetError::new(NetErrorKind::FrontendGone))
    }

    /// Asks the frontend for a move and blocks for the answer.
    #[instrument(skip(self, board))]
    pub fn request_move(&self, board: Board, mark: Mark) -> Result<TurnMessage, NetError> {
        self.notify(FrontendEvent::RequestMove { board, mark })?;
        let turn = self
            .moves
            .recv()
            .map_err(|_| NetError::new(NetErrorKind::FrontendGone))?;
        debug!(position = %turn.position, outcome = %turn.outcome, "Frontend answered");
        Ok(turn)
    }
}

impl FrontendHandle {
    /// Our mark, known before the first event arrives.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Blocks for the next event; `None` once the session has hung up.
    pub fn next_event(&self) -> Option<FrontendEvent> {
        self.events.recv().ok()
    }

    /// Answers the pending [`FrontendEvent::RequestMove`].
    pub fn respond(&self, turn: TurnMessage) -> Result<(), NetError> {
        self.moves
            .send(turn)
            .map_err(|_| NetError::new(NetErrorKind::FrontendGone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use strictly_tictactoe::{MoveOutcome, Position};

    #[test]
    fn test_request_move_round_trip() {
        let (session, frontend) = bridge(Mark::X);
        let worker = thread::spawn(move || session.request_move(Board::new(), Mark::X));

        match frontend.next_event() {
            Some(FrontendEvent::RequestMove { mark, board }) => {
                assert_eq!(mark, Mark::X);
                assert_eq!(board.free_cells(), 9);
            }
            other => panic!("expected RequestMove, got {other:?}"),
        }
        let turn = TurnMessage::new(Position::Center, MoveOutcome::Accepted);
        frontend.respond(turn).unwrap();

        assert_eq!(worker.join().unwrap().unwrap(), turn);
    }

    #[test]
    fn test_dropped_frontend() {
        let (session, frontend) = bridge(Mark::X);
        drop(frontend);
        let err = session.notify(FrontendEvent::WaitingForOpponent {
            board: Board::new(),
        });
        assert_eq!(err.unwrap_err().kind, NetErrorKind::FrontendGone);
    }

    #[test]
    fn test_dropped_session() {
        let (session, frontend) = bridge(Mark::X);
        drop(session);
        assert!(frontend.next_event().is_none());
    }
}
