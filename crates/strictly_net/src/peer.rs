//! Establishing the one TCP connection a session runs over.
//!
//! The listener accepts exactly one inbound connection and then drops its
//! listening socket; the connector dials a `host:port`.

use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use tracing::{info, instrument};

use crate::error::NetError;
use crate::transport::Transport;

/// A bound listening socket waiting for its single peer.
#[derive(Debug)]
pub struct PeerListener {
    listener: TcpListener,
}

impl PeerListener {
    /// Binds the listening socket. Port 0 lets the OS choose.
    #[instrument(skip(addr))]
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self, NetError> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "Listening for peer");
        Ok(Self { listener })
    }

    /// Address actually bound (useful when port 0 was requested).
    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        Ok(self.listener.local_addr()?)
    }

    /// Blocks for one inbound connection, then stops accepting.
    #[instrument(skip(self))]
    pub fn accept(self) -> Result<Transport, NetError> {
        let (stream, addr) = self.listener.accept()?;
        info!(%addr, "Peer connected");
        Transport::from_tcp(stream)
    }
}

/// Dials the listening peer.
#[instrument(skip(addr))]
pub fn connect(addr: impl ToSocketAddrs) -> Result<Transport, NetError> {
    let stream = TcpStream::connect(addr)?;
    info!(addr = %stream.peer_addr()?, "Connected to peer");
    Transport::from_tcp(stream)
}
