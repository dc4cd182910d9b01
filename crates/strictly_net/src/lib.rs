//! Symmetric two-peer session protocol.
//!
//! Two processes play one game over one TCP connection. Either side may
//! listen or connect; after the connection is up the roles only matter
//! for turn arbitration. Every move travels as a `turn` frame carrying
//! the position and the outcome its sender computed, and each side
//! re-applies the move to its own board before believing it.
//!
//! # Frames
//!
//! ```text
//! <tag>;{"value":<json>}
//! ```
//!
//! Tags are `timestamp`, `firstPlayer`, `turn`, `winstatus`,
//! `winstatusConfirmation` and `fatal`.
//!
//! # Threads
//!
//! [`spawn_session`] runs the state machine on a worker thread and
//! returns a [`FrontendHandle`] for the caller's thread. The two talk
//! over channels only.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arbitration;
mod bridge;
mod codec;
mod error;
mod message;
mod peer;
mod session;
mod transport;

pub use arbitration::{
    Clock, FixedClock, MAX_CLOCK_SKEW_SECS, Role, SystemClock, TurnOrder, arbitrate,
    draw_first_player,
};
pub use bridge::{FrontendEvent, FrontendHandle, SessionBridge, bridge};
pub use codec::{
    DELIMITER, MAX_TAG_LEN, Tag, encode_frame, read_tag, read_value, write_frame,
};
pub use error::{NetError, NetErrorKind};
pub use message::{Message, TurnMessage};
pub use peer::{PeerListener, connect};
pub use session::{GameResult, GameSession, SessionHandle, spawn_session};
pub use transport::Transport;
