//! Frame codec for the peer byte stream.
//!
//! One frame is `<tag>;<payload>`. There is no length prefix: the tag ends
//! at the first `;` and the payload is a serde_json object `{"value": …}`.
//! Wrapping every value in an object makes the payload self-terminating,
//! so the decoder stops on the closing `}` and the next frame's first byte
//! stays in the stream.

use std::io::{BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{NetError, NetErrorKind};

/// Byte separating the tag from the payload.
pub const DELIMITER: u8 = b';';

/// Longest tag accepted before the delimiter. Guards against a peer that
/// streams garbage without ever sending `;`.
pub const MAX_TAG_LEN: usize = 64;

/// Message kind, written as the ASCII prefix of every frame.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum Tag {
    /// Connector's Unix timestamp, the arbitration seed.
    #[strum(serialize = "timestamp")]
    Timestamp,
    /// First-player bit, from the listener's point of view.
    #[strum(serialize = "firstPlayer")]
    FirstPlayer,
    /// A move and the outcome its sender computed.
    #[strum(serialize = "turn")]
    Turn,
    /// Final outcome as computed by the side that received the last move.
    #[strum(serialize = "winstatus")]
    WinStatus,
    /// Whether the final outcomes match.
    #[strum(serialize = "winstatusConfirmation")]
    WinStatusConfirmation,
    /// The sender aborted; carries the reason.
    #[strum(serialize = "fatal")]
    Fatal,
}

#[derive(Serialize)]
struct PayloadRef<'a, T> {
    value: &'a T,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload<T> {
    value: T,
}

/// Encodes one frame into bytes.
pub fn encode_frame<T: Serialize>(tag: Tag, value: &T) -> Result<Vec<u8>, NetError> {
    let tag = tag.as_ref().as_bytes();
    let mut frame = Vec::with_capacity(tag.len() + 32);
    frame.extend_from_slice(tag);
    frame.push(DELIMITER);
    serde_json::to_writer(&mut frame, &PayloadRef { value })?;
    Ok(frame)
}

/// Writes one frame and flushes it.
///
/// The frame is assembled first and written with a single `write_all`, so
/// a short write surfaces as an error rather than half a frame.
pub fn write_frame<W: Write, T: Serialize>(
    writer: &mut W,
    tag: Tag,
    value: &T,
) -> Result<(), NetError> {
    let frame = encode_frame(tag, value)?;
    trace!(%tag, bytes = frame.len(), "Writing frame");
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Reads bytes up to and including the delimiter and parses the tag.
///
/// A clean EOF before any byte, or mid-tag, is reported as
/// [`NetErrorKind::ConnectionClosed`].
pub fn read_tag<R: BufRead>(reader: &mut R) -> Result<Tag, NetError> {
    let mut buf = Vec::with_capacity(MAX_TAG_LEN);
    let read = reader
        .by_ref()
        .take(MAX_TAG_LEN as u64 + 1)
        .read_until(DELIMITER, &mut buf)?;

    if buf.last() != Some(&DELIMITER) {
        if read > MAX_TAG_LEN {
            return Err(NetError::new(NetErrorKind::Codec(format!(
                "no delimiter within {MAX_TAG_LEN} bytes"
            ))));
        }
        return Err(NetError::new(NetErrorKind::ConnectionClosed));
    }
    buf.pop();

    let text = std::str::from_utf8(&buf)
        .map_err(|e| NetError::new(NetErrorKind::Codec(format!("tag is not UTF-8: {e}"))))?;
    text.parse::<Tag>()
        .map_err(|_| NetError::new(NetErrorKind::Codec(format!("unknown tag {text:?}"))))
}

/// Decodes the payload that follows a tag.
///
/// Consumes exactly the bytes of the payload object.
pub fn read_value<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<T, NetError> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let payload = Payload::<T>::deserialize(&mut de)?;
    Ok(payload.value)
}
