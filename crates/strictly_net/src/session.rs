//! The game session state machine.
//!
//! Runs on its own worker thread once the turn order is agreed. It
//! alternates between asking the local frontend for a move and waiting on
//! the peer's move, re-applying every move to its own board. Neither side
//! trusts the other's claimed outcome: a move whose outcome differs from
//! the locally computed one ends the session, and the final result must
//! be confirmed by both sides.

use std::thread::{self, JoinHandle};

use strictly_tictactoe::{Board, Mark, MoveOutcome, apply_move};
use tracing::{debug, error, info, info_span, instrument, warn};

use crate::arbitration::TurnOrder;
use crate::bridge::{FrontendEvent, FrontendHandle, SessionBridge, bridge};
use crate::error::{NetError, NetErrorKind};
use crate::message::{Message, TurnMessage};
use crate::transport::Transport;

/// Final result from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameResult {
    /// Nobody completed a line.
    #[display("draw")]
    Draw,
    /// We completed a line.
    #[display("win")]
    LocalWin,
    /// The opponent completed a line.
    #[display("loss")]
    RemoteWin,
}

impl GameResult {
    /// Maps a terminal outcome to our point of view; `None` if the game
    /// is not over.
    pub fn from_outcome(outcome: MoveOutcome, local: Mark) -> Option<Self> {
        match outcome {
            MoveOutcome::Draw => Some(GameResult::Draw),
            MoveOutcome::Win(mark) if mark == local => Some(GameResult::LocalWin),
            MoveOutcome::Win(_) => Some(GameResult::RemoteWin),
            MoveOutcome::Accepted | MoveOutcome::Rejected => None,
        }
    }
}

/// Per-connection game state, owned by the session worker.
#[derive(Debug, Clone)]
struct Session {
    board: Board,
    mark: Mark,
    moves_first: bool,
}

impl Session {
    /// Fresh board for the agreed turn order.
    fn new(order: &TurnOrder) -> Self {
        Self {
            board: Board::new(),
            mark: order.local_mark(),
            moves_first: order.moves_first,
        }
    }
}

/// States of the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MyTurn,
    HisTurn,
    WaitForResultConfirmation(MoveOutcome, GameResult),
    Finished(GameResult),
}

/// Drives one session over one transport.
#[derive(Debug)]
pub struct GameSession {
    session: Session,
    transport: Transport,
    bridge: SessionBridge,
}

impl GameSession {
    /// Creates a session ready to run.
    pub fn new(transport: Transport, order: TurnOrder, bridge: SessionBridge) -> Self {
        Self {
            session: Session::new(&order),
            transport,
            bridge,
        }
    }

    /// Runs the session to completion.
    ///
    /// On failure the frontend receives [`FrontendEvent::Error`] before the
    /// error is returned.
    pub fn run(mut self) -> Result<GameResult, NetError> {
        match self.drive() {
            Ok(result) => {
                info!(%result, "Session finished");
                Ok(result)
            }
            Err(err) => {
                if err.kind().is_protocol_violation() {
                    error!(error = %err, "Peer broke the protocol, session aborted");
                } else {
                    warn!(error = %err, "Session aborted");
                }
                if self.bridge.notify(FrontendEvent::Error(err.clone())).is_err() {
                    debug!("Frontend already gone, error not delivered");
                }
                Err(err)
            }
        }
    }

    fn drive(&mut self) -> Result<GameResult, NetError> {
        let mut state = if self.session.moves_first {
            State::MyTurn
        } else {
            State::HisTurn
        };

        loop {
            debug!(?state, "Entering state");
            state = match state {
                State::MyTurn => self.my_turn()?,
                State::HisTurn => self.his_turn()?,
                State::WaitForResultConfirmation(outcome, result) => {
                    self.wait_for_result_confirmation(outcome, result)?
                }
                State::Finished(result) => {
                    let board = self.session.board;
                    if self.bridge.notify(FrontendEvent::Finished { board, result }).is_err() {
                        warn!("Frontend left before the result was shown");
                    }
                    return Ok(result);
                }
            };
        }
    }

    /// Forwards an event; if the frontend is gone, the peer is told so.
    fn notify(&mut self, event: FrontendEvent) -> Result<(), NetError> {
        match self.bridge.notify(event) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.transport.abort(err)),
        }
    }

    #[instrument(skip(self), fields(mark = %self.session.mark))]
    fn my_turn(&mut self) -> Result<State, NetError> {
        let mark = self.session.mark;
        let turn = match self.bridge.request_move(self.session.board, mark) {
            Ok(turn) => turn,
            Err(err) => return Err(self.transport.abort(err)),
        };

        // The frontend worked on a copy; replay the move on ours.
        let computed = apply_move(&mut self.session.board, turn.position, mark);
        if computed == MoveOutcome::Rejected || computed != turn.outcome {
            let err = NetError::new(NetErrorKind::InvalidLocalMove {
                position: turn.position,
                claimed: turn.outcome,
                computed,
            });
            return Err(self.transport.abort(err));
        }

        self.transport.send(&Message::Turn(turn))?;
        info!(position = %turn.position, outcome = %computed, "Played move");

        match GameResult::from_outcome(computed, mark) {
            Some(result) => {
                self.notify(FrontendEvent::WaitingForConfirmation {
                    board: self.session.board,
                })?;
                Ok(State::WaitForResultConfirmation(computed, result))
            }
            None => Ok(State::HisTurn),
        }
    }

    #[instrument(skip(self), fields(mark = %self.session.mark))]
    fn his_turn(&mut self) -> Result<State, NetError> {
        self.notify(FrontendEvent::WaitingForOpponent {
            board: self.session.board,
        })?;

        let TurnMessage { position, outcome } = self.transport.expect_turn()?;
        let theirs = self.session.mark.opponent();
        let computed = apply_move(&mut self.session.board, position, theirs);

        if computed == MoveOutcome::Rejected {
            let err = NetError::new(NetErrorKind::InvalidPeerMove(position));
            return Err(self.transport.abort(err));
        }
        if computed != outcome {
            let err = NetError::new(NetErrorKind::OutcomeMismatch {
                claimed: outcome,
                computed,
            });
            return Err(self.transport.abort(err));
        }
        info!(%position, outcome = %computed, "Opponent moved");

        match GameResult::from_outcome(computed, self.session.mark) {
            Some(result) => {
                self.transport.send(&Message::WinStatus(computed))?;
                if self.transport.expect_confirmation()? {
                    Ok(State::Finished(result))
                } else {
                    Err(NetError::new(NetErrorKind::ResultMismatch {
                        ours: computed,
                        theirs: None,
                    }))
                }
            }
            None => Ok(State::MyTurn),
        }
    }

    #[instrument(skip(self))]
    fn wait_for_result_confirmation(
        &mut self,
        ours: MoveOutcome,
        result: GameResult,
    ) -> Result<State, NetError> {
        let theirs = self.transport.expect_win_status()?;
        let agreed = theirs == ours;
        self.transport
            .send(&Message::WinStatusConfirmation(agreed))?;

        if agreed {
            Ok(State::Finished(result))
        } else {
            Err(NetError::new(NetErrorKind::ResultMismatch {
                ours,
                theirs: Some(theirs),
            }))
        }
    }
}

/// Handle on a session running on its worker thread.
#[derive(Debug)]
pub struct SessionHandle {
    thread: JoinHandle<Result<GameResult, NetError>>,
}

impl SessionHandle {
    /// Waits for the worker and returns its result.
    pub fn join(self) -> Result<GameResult, NetError> {
        self.thread
            .join()
            .unwrap_or_else(|_| Err(NetError::new(NetErrorKind::WorkerPanicked)))
    }
}

/// Starts the session state machine on a dedicated worker thread.
///
/// Returns the worker handle and the frontend's end of the bridge.
#[instrument(skip(transport), fields(peer = %transport.peer()))]
pub fn spawn_session(
    transport: Transport,
    order: TurnOrder,
) -> Result<(SessionHandle, FrontendHandle), NetError> {
    let (session_bridge, frontend) = bridge(order.local_mark());
    let game = GameSession::new(transport, order, session_bridge);
    let span = info_span!("session", role = %order.role, mark = %order.local_mark());
    let thread = thread::Builder::new()
        .name("peer-session".to_string())
        .spawn(move || span.in_scope(|| game.run()))?;
    Ok((SessionHandle { thread }, frontend))
}
