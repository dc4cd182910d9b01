//! Pure tic-tac-toe rules shared by both peers of a duel.
//!
//! Nothing in here knows about sockets or threads. Each peer owns its own
//! [`Board`] and feeds every move, local or remote, through [`apply_move`].
//! Because the rules are deterministic, two honest peers that apply the
//! same moves in the same order always arrive at the same [`MoveOutcome`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod position;
mod rules;
mod types;

pub use position::{Position, PositionError};
pub use rules::{apply_move, is_full, winner_through};
pub use types::{Board, Mark, MoveOutcome, Square};
