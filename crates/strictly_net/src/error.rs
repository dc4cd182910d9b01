//! Error types for the peer session.
//!
//! Every failure ends the session: there is no retry and no resync. The
//! kinds split into transport errors (the byte stream broke), protocol
//! errors (the peer said something the rules forbid) and bridge errors
//! (the local frontend went away).

use derive_more::{Display, Error};
use strictly_tictactoe::{MoveOutcome, Position};
use tracing::instrument;

use crate::codec::Tag;

/// What went wrong, without the location.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum NetErrorKind {
    /// Read or write on the connection failed.
    #[display("I/O error: {}", _0)]
    Io(String),

    /// The peer closed the connection mid-session.
    #[display("Connection closed by peer")]
    ConnectionClosed,

    /// A frame could not be encoded or decoded.
    #[display("Malformed frame: {}", _0)]
    Codec(String),

    /// A frame arrived with a tag other than the one the protocol expects.
    #[display("Unexpected message {found} (expected {expected})")]
    UnexpectedMessage {
        /// Tag the state machine was waiting for.
        expected: Tag,
        /// Tag that actually arrived.
        found: Tag,
    },

    /// The peer aborted and told us why.
    #[display("Got fatal error from the peer: {}", _0)]
    PeerFatal(String),

    /// The connector's timestamp is too far from our clock.
    #[display("bad timestamp: peer sent {remote}, local clock is {local}")]
    ClockSkew {
        /// Local Unix time in seconds.
        local: i64,
        /// Peer's Unix time in seconds.
        remote: i64,
    },

    /// Both sides drew from the same seed but disagree on the result.
    #[display("Mismatching first player: ours {ours}, theirs {theirs}")]
    FirstPlayerMismatch {
        /// Our draw.
        ours: u8,
        /// The peer's claimed draw.
        theirs: u8,
    },

    /// The peer played onto an occupied cell.
    #[display("Invalid move received from peer: {}", _0)]
    InvalidPeerMove(Position),

    /// The peer's claimed outcome differs from what our rules computed.
    #[display("Mismatching turn result: peer claimed {claimed}, we computed {computed}")]
    OutcomeMismatch {
        /// Outcome the peer sent.
        claimed: MoveOutcome,
        /// Outcome our board produced.
        computed: MoveOutcome,
    },

    /// The two sides could not agree on the final result.
    #[display("Could not agree on game result: ours {ours}, theirs {theirs:?}")]
    ResultMismatch {
        /// Our final outcome.
        ours: MoveOutcome,
        /// The peer's final outcome, when it told us.
        theirs: Option<MoveOutcome>,
    },

    /// The local frontend answered with a move our board disagrees with.
    #[display("Invalid local move at {position}: frontend claimed {claimed}, board says {computed}")]
    InvalidLocalMove {
        /// Cell the frontend chose.
        position: Position,
        /// Outcome the frontend reported.
        claimed: MoveOutcome,
        /// Outcome our board produced.
        computed: MoveOutcome,
    },

    /// The frontend side of the bridge hung up (the local player quit).
    #[display("Player left the game")]
    FrontendGone,

    /// The session worker thread panicked.
    #[display("Session worker panicked")]
    WorkerPanicked,
}

impl NetErrorKind {
    /// True for errors caused by the peer breaking protocol or rules.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            NetErrorKind::UnexpectedMessage { .. }
                | NetErrorKind::ClockSkew { .. }
                | NetErrorKind::FirstPlayerMismatch { .. }
                | NetErrorKind::InvalidPeerMove(_)
                | NetErrorKind::OutcomeMismatch { .. }
                | NetErrorKind::ResultMismatch { .. }
        )
    }
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct NetError {
    /// What went wrong.
    pub kind: NetErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl NetError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind), fields(kind = %kind))]
    pub fn new(kind: NetErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &NetErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for NetError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe => Self::new(NetErrorKind::ConnectionClosed),
            _ => Self::new(NetErrorKind::Io(err.to_string())),
        }
    }
}

impl From<serde_json::Error> for NetError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        if err.is_eof() {
            Self::new(NetErrorKind::ConnectionClosed)
        } else if err.is_io() {
            Self::new(NetErrorKind::Io(err.to_string()))
        } else {
            Self::new(NetErrorKind::Codec(err.to_string()))
        }
    }
}
