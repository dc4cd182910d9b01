//! Deciding who moves first without a trusted third party.
//!
//! The connector sends its Unix timestamp. Both sides seed the same
//! portable PRNG (ChaCha8) with it and draw one bit. The listener sends
//! its draw, the connector checks it against its own and echoes its own
//! draw back, and the listener checks that echo. A bit of 0 means the
//! listener moves first.
//!
//! This only catches a peer that is inconsistent. A peer that lies about
//! its clock, or recomputes with a different generator and claims the
//! outcome it prefers, is not detected.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strictly_tictactoe::Mark;
use tracing::{info, instrument};

use crate::error::{NetError, NetErrorKind};
use crate::message::Message;
use crate::transport::Transport;

/// Largest accepted difference between the peers' clocks, in seconds.
pub const MAX_CLOCK_SKEW_SECS: i64 = 1;

/// Which end of the connection this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Role {
    /// Accepted the connection.
    #[display("listener")]
    Listener,
    /// Dialed the connection.
    #[display("connector")]
    Connector,
}

/// Source of wall-clock time in whole Unix seconds.
pub trait Clock {
    /// Current Unix time in seconds.
    fn unix_now(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_now(&self) -> i64 {
        self.0
    }
}

/// Agreed turn order for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    /// Our end of the connection.
    pub role: Role,
    /// Timestamp both sides seeded with.
    pub seed: i64,
    /// The agreed bit, from the listener's point of view.
    pub first_player: u8,
    /// Whether this process moves first.
    pub moves_first: bool,
}

impl TurnOrder {
    /// Derives the local order from the agreed bit.
    ///
    /// The bit is from the listener's point of view, so the connector
    /// inverts it.
    pub fn new(role: Role, seed: i64, first_player: u8) -> Self {
        let listener_first = first_player == 0;
        let moves_first = match role {
            Role::Listener => listener_first,
            Role::Connector => !listener_first,
        };
        Self {
            role,
            seed,
            first_player,
            moves_first,
        }
    }

    /// Our mark: X when we move first.
    pub fn local_mark(&self) -> Mark {
        Mark::for_turn_order(self.moves_first)
    }
}

/// Draws the first-player bit for `seed`.
///
/// ChaCha8 output is specified independently of platform and library
/// version, which is what lets two processes agree on it.
pub fn draw_first_player(seed: i64) -> u8 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    rng.gen_range(0..2)
}

/// Runs our side of the arbitration exchange.
#[instrument(skip(transport, clock), fields(peer = %transport.peer()))]
pub fn arbitrate(
    transport: &mut Transport,
    role: Role,
    clock: &dyn Clock,
) -> Result<TurnOrder, NetError> {
    let order = match role {
        Role::Listener => validate(transport, clock)?,
        Role::Connector => negotiate(transport, clock)?,
    };
    info!(
        seed = order.seed,
        first_player = order.first_player,
        moves_first = order.moves_first,
        "Turn order agreed"
    );
    Ok(order)
}

/// Listener side: check the timestamp, draw, announce, verify the echo.
fn validate(transport: &mut Transport, clock: &dyn Clock) -> Result<TurnOrder, NetError> {
    let remote = transport.expect_timestamp()?;
    let local = clock.unix_now();
    if local.abs_diff(remote) > MAX_CLOCK_SKEW_SECS.unsigned_abs() {
        return Err(transport.abort(NetError::new(NetErrorKind::ClockSkew { local, remote })));
    }

    let ours = draw_first_player(remote);
    transport.send(&Message::FirstPlayer(ours))?;

    let theirs = transport.expect_first_player()?;
    if theirs != ours {
        return Err(transport.abort(NetError::new(NetErrorKind::FirstPlayerMismatch {
            ours,
            theirs,
        })));
    }
    Ok(TurnOrder::new(Role::Listener, remote, ours))
}

/// Connector side: send the timestamp, check the listener's draw, echo ours.
fn negotiate(transport: &mut Transport, clock: &dyn Clock) -> Result<TurnOrder, NetError> {
    let seed = clock.unix_now();
    transport.send(&Message::Timestamp(seed))?;

    let theirs = transport.expect_first_player()?;
    let ours = draw_first_player(seed);
    if theirs != ours {
        return Err(transport.abort(NetError::new(NetErrorKind::FirstPlayerMismatch {
            ours,
            theirs,
        })));
    }

    transport.send(&Message::FirstPlayer(ours))?;
    Ok(TurnOrder::new(Role::Connector, seed, ours))
}
