//! Typed protocol messages.
//!
//! The tag read off the wire decides which payload shape gets decoded, so
//! every message lands in a statically known variant.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use strictly_tictactoe::{MoveOutcome, Position};

use crate::codec::{Tag, read_tag, read_value, write_frame};
use crate::error::NetError;

/// The unit exchanged for every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct TurnMessage {
    /// Cell the mover chose.
    pub position: Position,
    /// Outcome the mover computed with its own rules.
    pub outcome: MoveOutcome,
}

/// One frame on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Connector's Unix time in seconds.
    Timestamp(i64),
    /// First-player bit (0 means the listener moves first).
    FirstPlayer(u8),
    /// A move.
    Turn(TurnMessage),
    /// Final outcome claimed by the sender.
    WinStatus(MoveOutcome),
    /// Whether the receiver's final outcome matched.
    WinStatusConfirmation(bool),
    /// The sender aborted.
    Fatal(String),
}

impl Message {
    /// Tag written in front of this message.
    pub fn tag(&self) -> Tag {
        match self {
            Message::Timestamp(_) => Tag::Timestamp,
            Message::FirstPlayer(_) => Tag::FirstPlayer,
            Message::Turn(_) => Tag::Turn,
            Message::WinStatus(_) => Tag::WinStatus,
            Message::WinStatusConfirmation(_) => Tag::WinStatusConfirmation,
            Message::Fatal(_) => Tag::Fatal,
        }
    }

    /// Writes this message as one frame.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), NetError> {
        let tag = self.tag();
        match self {
            Message::Timestamp(secs) => write_frame(writer, tag, secs),
            Message::FirstPlayer(bit) => write_frame(writer, tag, bit),
            Message::Turn(turn) => write_frame(writer, tag, turn),
            Message::WinStatus(outcome) => write_frame(writer, tag, outcome),
            Message::WinStatusConfirmation(agreed) => write_frame(writer, tag, agreed),
            Message::Fatal(reason) => write_frame(writer, tag, reason),
        }
    }

    /// Reads one frame.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, NetError> {
        let tag = read_tag(reader)?;
        Self::read_payload(tag, reader)
    }

    /// Decodes the payload shape that belongs to `tag`.
    pub fn read_payload<R: BufRead>(tag: Tag, reader: &mut R) -> Result<Self, NetError> {
        Ok(match tag {
            Tag::Timestamp => Message::Timestamp(read_value(reader)?),
            Tag::FirstPlayer => Message::FirstPlayer(read_value(reader)?),
            Tag::Turn => Message::Turn(read_value(reader)?),
            Tag::WinStatus => Message::WinStatus(read_value(reader)?),
            Tag::WinStatusConfirmation => Message::WinStatusConfirmation(read_value(reader)?),
            Tag::Fatal => Message::Fatal(read_value(reader)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetErrorKind;
    use std::io::Cursor;
    use strictly_tictactoe::Mark;

    #[test]
    fn test_turn_wire_shape() {
        let mut wire = Vec::new();
        Message::Turn(TurnMessage::new(Position::TopRight, MoveOutcome::Win(Mark::O)))
            .write_to(&mut wire)
            .unwrap();
        assert_eq!(
            String::from_utf8(wire).unwrap(),
            r#"turn;{"value":{"position":[0,2],"outcome":{"Win":"O"}}}"#
        );
    }

    #[test]
    fn test_session_sequence_reads_back() {
        let sent = [
            Message::Timestamp(1_700_000_000),
            Message::FirstPlayer(0),
            Message::FirstPlayer(0),
            Message::Turn(TurnMessage::new(Position::Center, MoveOutcome::Accepted)),
            Message::WinStatus(MoveOutcome::Draw),
            Message::WinStatusConfirmation(false),
            Message::Fatal("Mismatching turn result".into()),
        ];
        let mut wire = Vec::new();
        for message in &sent {
            message.write_to(&mut wire).unwrap();
        }

        let mut cursor = Cursor::new(wire);
        for expected in &sent {
            assert_eq!(&Message::read_from(&mut cursor).unwrap(), expected);
        }
    }

    #[test]
    fn test_payload_shape_follows_tag() {
        // A boolean where a turn belongs.
        let mut cursor = Cursor::new(br#"turn;{"value":true}"#.to_vec());
        let err = Message::read_from(&mut cursor).unwrap_err();
        assert!(matches!(err.kind, NetErrorKind::Codec(_)));
    }

    #[test]
    fn test_off_board_coordinates_are_rejected() {
        let mut cursor =
            Cursor::new(br#"turn;{"value":{"position":[3,1],"outcome":"Accepted"}}"#.to_vec());
        let err = Message::read_from(&mut cursor).unwrap_err();
        assert!(matches!(err.kind, NetErrorKind::Codec(_)));
    }
}
