//! Strictly Duel - peer-to-peer tic-tac-toe
//!
//! Two copies of the program play one game over TCP. One listens, the
//! other connects; after that they are equals. Each keeps its own board
//! and checks every move the other sends.
//!
//! # Architecture
//!
//! - **Rules**: `strictly_tictactoe`, shared by both peers
//! - **Protocol**: `strictly_net`, framing, turn arbitration and the session
//!   worker
//! - **Frontend**: console rendering and move input on the main thread
//! - **Players**: human, simple AI, scripted
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//! use std::time::Duration;
//! use strictly_duel::{ConsoleView, SimpleAi, practice};
//!
//! # fn example() -> Result<(), strictly_net::NetError> {
//! let mut player = SimpleAi::new("bot", Duration::ZERO);
//! let mut view = ConsoleView::new(io::stdout(), true);
//! let ending = practice(&mut player, &mut view, Duration::from_millis(500))?;
//! println!("{ending:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod frontend;
mod play;
mod players;

// Crate-level exports - Configuration
pub use config::{ConfigError, DuelConfig, PlayerKind};

// Crate-level exports - Frontend
pub use frontend::{Banner, ConsoleView, Ending, InputError, View, parse_move, run_frontend};

// Crate-level exports - Players
pub use players::{HumanPlayer, MoveChoice, Player, ScriptedPlayer, SimpleAi};

// Crate-level exports - Orchestration
pub use play::{connect, listen, play_over, practice};
