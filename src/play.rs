//! Wiring one duel together: connect, arbitrate, run both threads.

use std::io;
use std::net::ToSocketAddrs;
use std::thread;
use std::time::Duration;

use strictly_net::{
    Clock, NetError, PeerListener, Role, SystemClock, Transport, arbitrate,
    connect as dial, spawn_session,
};
use tracing::{debug, info, instrument, warn};

use crate::frontend::{ConsoleView, Ending, View, run_frontend};
use crate::players::{Player, SimpleAi};

/// Waits for one peer on `addr` and plays against it.
#[instrument(skip_all)]
pub fn listen(
    addr: impl ToSocketAddrs,
    player: &mut dyn Player,
    view: &mut dyn View,
) -> Result<Ending, NetError> {
    let listener = PeerListener::bind(addr)?;
    let transport = listener.accept()?;
    play_over(transport, Role::Listener, &SystemClock, player, view)
}

/// Dials the peer at `addr` and plays against it.
#[instrument(skip_all)]
pub fn connect(
    addr: impl ToSocketAddrs,
    player: &mut dyn Player,
    view: &mut dyn View,
) -> Result<Ending, NetError> {
    let transport = dial(addr)?;
    play_over(transport, Role::Connector, &SystemClock, player, view)
}

/// Plays one game over an established connection.
///
/// Arbitration runs on this thread; the session then moves to its worker
/// and this thread serves the frontend until the game ends.
#[instrument(skip(transport, clock, player, view), fields(peer = %transport.peer()))]
pub fn play_over(
    mut transport: Transport,
    role: Role,
    clock: &dyn Clock,
    player: &mut dyn Player,
    view: &mut dyn View,
) -> Result<Ending, NetError> {
    let order = arbitrate(&mut transport, role, clock)?;
    let (handle, frontend) = spawn_session(transport, order)?;

    let ending = run_frontend(frontend, player, view);
    let joined = handle.join();

    match ending {
        Ok(Ending::Finished(result)) => joined.map(|_| Ending::Finished(result)),
        Ok(Ending::Quit) => {
            debug!(?joined, "Session wound down after quit");
            Ok(Ending::Quit)
        }
        Err(err) => Err(err),
    }
}

/// Plays a local game against the simple AI.
///
/// The AI runs as a real peer on a loopback connection, so the game goes
/// through the same protocol as a remote one. The local side connects.
#[instrument(skip(player, view))]
pub fn practice(
    player: &mut dyn Player,
    view: &mut dyn View,
    ai_delay: Duration,
) -> Result<Ending, NetError> {
    let listener = PeerListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    info!(%addr, "Practice opponent listening");

    let opponent = thread::Builder::new()
        .name("practice-opponent".to_string())
        .spawn(move || {
            let mut ai = SimpleAi::new("Simple AI", ai_delay);
            let mut quiet = ConsoleView::new(io::sink(), false);
            let transport = listener.accept()?;
            play_over(transport, Role::Listener, &SystemClock, &mut ai, &mut quiet)
        })?;

    // If dialing fails the opponent is left blocked in accept; it dies with
    // the process.
    let transport = dial(addr)?;
    let ours = play_over(transport, Role::Connector, &SystemClock, player, view);

    match opponent.join() {
        Ok(Ok(ending)) => debug!(?ending, "Practice opponent done"),
        Ok(Err(err)) => debug!(error = %err, "Practice opponent stopped"),
        Err(_) => warn!("Practice opponent panicked"),
    }

    ours
}
