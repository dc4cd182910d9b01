//! Blocking, typed send/receive over one peer connection.
//!
//! The reader and writer halves are buffered separately so reads never
//! wait on writes. There is no read timeout: a silent peer blocks the
//! session until the connection is closed.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use strictly_tictactoe::MoveOutcome;
use tracing::{debug, instrument, warn};

use crate::codec::Tag;
use crate::error::{NetError, NetErrorKind};
use crate::message::{Message, TurnMessage};

/// One bidirectional peer connection.
pub struct Transport {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
    peer: String,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").field("peer", &self.peer).finish()
    }
}

impl Transport {
    /// Wraps an arbitrary reader/writer pair.
    pub fn new(
        reader: impl BufRead + Send + 'static,
        writer: impl Write + Send + 'static,
        peer: impl Into<String>,
    ) -> Self {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            peer: peer.into(),
        }
    }

    /// Splits a TCP stream into buffered halves.
    #[instrument(skip(stream))]
    pub fn from_tcp(stream: TcpStream) -> Result<Self, NetError> {
        stream.set_nodelay(true)?;
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);
        debug!(%peer, "Transport ready");
        Ok(Self::new(reader, writer, peer))
    }

    /// Label of the remote end, for logs.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Sends one message; blocks until it is flushed.
    #[instrument(skip(self), fields(peer = %self.peer, tag = %message.tag()))]
    pub fn send(&mut self, message: &Message) -> Result<(), NetError> {
        debug!(?message, "Sending message");
        message.write_to(&mut self.writer)
    }

    /// Receives one message; blocks until a full frame arrives.
    ///
    /// A `fatal` frame from the peer comes back as
    /// [`NetErrorKind::PeerFatal`]. A frame that cannot be decoded is
    /// reported to the peer before the error is returned.
    #[instrument(skip(self), fields(peer = %self.peer))]
    pub fn recv(&mut self) -> Result<Message, NetError> {
        match Message::read_from(&mut self.reader) {
            Ok(Message::Fatal(reason)) => {
                warn!(%reason, "Peer aborted");
                Err(NetError::new(NetErrorKind::PeerFatal(reason)))
            }
            Ok(message) => {
                debug!(?message, "Received message");
                Ok(message)
            }
            Err(err) if matches!(err.kind, NetErrorKind::Codec(_)) => Err(self.abort(err)),
            Err(err) => Err(err),
        }
    }

    /// Tells the peer we are aborting, then hands the error back.
    ///
    /// The `fatal` frame is best effort: if the connection is already
    /// broken the original error still wins.
    pub fn abort(&mut self, err: NetError) -> NetError {
        let reason = err.kind.to_string();
        if let Err(send_err) = self.send(&Message::Fatal(reason)) {
            warn!(error = %send_err, "Could not deliver fatal frame to peer");
        }
        err
    }

    /// Reports a frame with the wrong tag to the peer and returns the error.
    #[track_caller]
    fn unexpected(&mut self, expected: Tag, found: &Message) -> NetError {
        let err = NetError::new(NetErrorKind::UnexpectedMessage {
            expected,
            found: found.tag(),
        });
        self.abort(err)
    }

    /// Waits for the arbitration timestamp.
    pub fn expect_timestamp(&mut self) -> Result<i64, NetError> {
        match self.recv()? {
            Message::Timestamp(secs) => Ok(secs),
            other => Err(self.unexpected(Tag::Timestamp, &other)),
        }
    }

    /// Waits for a first-player bit.
    pub fn expect_first_player(&mut self) -> Result<u8, NetError> {
        match self.recv()? {
            Message::FirstPlayer(bit) => Ok(bit),
            other => Err(self.unexpected(Tag::FirstPlayer, &other)),
        }
    }

    /// Waits for the opponent's move.
    pub fn expect_turn(&mut self) -> Result<TurnMessage, NetError> {
        match self.recv()? {
            Message::Turn(turn) => Ok(turn),
            other => Err(self.unexpected(Tag::Turn, &other)),
        }
    }

    /// Waits for the peer's final outcome.
    pub fn expect_win_status(&mut self) -> Result<MoveOutcome, NetError> {
        match self.recv()? {
            Message::WinStatus(outcome) => Ok(outcome),
            other => Err(self.unexpected(Tag::WinStatus, &other)),
        }
    }

    /// Waits for the peer's verdict on our final outcome.
    pub fn expect_confirmation(&mut self) -> Result<bool, NetError> {
        match self.recv()? {
            Message::WinStatusConfirmation(agreed) => Ok(agreed),
            other => Err(self.unexpected(Tag::WinStatusConfirmation, &other)),
        }
    }
}
