// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! UDP socket ownership and the bounded receive poll.
//!
//! Sockets are built with socket2 (reuse-address, TTL, group join) and
//! handed to mio as nonblocking sockets; `mio::Poll` provides the
//! time-bounded wait the runner races against each test's deadline.

use crate::config::{TesterConfig, MAX_DATAGRAM_SIZE, SLP_MULTICAST_GROUP};
use mio::net::UdpSocket;
use mio::{Events, Interest, Poll, Token};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

/// Poll token for the unicast socket.
pub const UNICAST: Token = Token(0);
/// Poll token for the multicast-joined socket.
pub const MULTICAST: Token = Token(1);

/// Transport failures. All of these abort the run immediately.
#[derive(Debug)]
pub enum TransportError {
    Bind(io::Error),
    MulticastJoin(io::Error),
    Send(io::Error),
    Recv(io::Error),
    Poll(io::Error),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind(e) => write!(f, "socket bind failed: {}", e),
            Self::MulticastJoin(e) => write!(f, "multicast group join failed: {}", e),
            Self::Send(e) => write!(f, "send failed: {}", e),
            Self::Recv(e) => write!(f, "receive failed: {}", e),
            Self::Poll(e) => write!(f, "poll failed: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind(e)
            | Self::MulticastJoin(e)
            | Self::Send(e)
            | Self::Recv(e)
            | Self::Poll(e) => Some(e),
        }
    }
}

/// UDP transport for one suite run.
///
/// Owns both sockets and the poll instance; replies are received on the
/// same socket that sent the request, so correlation never depends on
/// the reply's source address.
pub struct Transport {
    poll: Poll,
    unicast: UdpSocket,
    multicast: UdpSocket,
    unicast_dest: SocketAddr,
    multicast_dest: SocketAddr,
    mcast_iface: Ipv4Addr,
}

impl Transport {
    /// Open and register both sockets.
    ///
    /// The unicast socket binds an ephemeral port; the multicast socket
    /// binds an ephemeral port and joins the SLP group on the interface
    /// from `SLPCHECK_MULTICAST_IF` (UNSPECIFIED when absent).
    pub fn open(config: &TesterConfig) -> Result<Self, TransportError> {
        let poll = Poll::new().map_err(TransportError::Poll)?;

        let mut unicast = bind_ephemeral().map_err(TransportError::Bind)?;
        log::debug!(
            "[transport] unicast socket bound to {:?}",
            unicast.local_addr()
        );

        let mcast_iface = TesterConfig::multicast_interface();
        let mut multicast = bind_ephemeral().map_err(TransportError::Bind)?;
        multicast
            .join_multicast_v4(&SLP_MULTICAST_GROUP, &mcast_iface)
            .map_err(TransportError::MulticastJoin)?;
        multicast
            .set_multicast_ttl_v4(config.multicast_ttl)
            .map_err(TransportError::MulticastJoin)?;
        // Our own multicast requests must not loop back into the wait
        // loop: a looped SrvRqst carries the xid being waited on.
        multicast
            .set_multicast_loop_v4(false)
            .map_err(TransportError::MulticastJoin)?;
        log::debug!(
            "[transport] joined {} on iface {} (socket {:?})",
            SLP_MULTICAST_GROUP,
            mcast_iface,
            multicast.local_addr()
        );

        poll.registry()
            .register(&mut unicast, UNICAST, Interest::READABLE)
            .map_err(TransportError::Poll)?;
        poll.registry()
            .register(&mut multicast, MULTICAST, Interest::READABLE)
            .map_err(TransportError::Poll)?;

        Ok(Transport {
            poll,
            unicast,
            multicast,
            unicast_dest: SocketAddr::V4(SocketAddrV4::new(config.target, config.port)),
            multicast_dest: SocketAddr::V4(SocketAddrV4::new(SLP_MULTICAST_GROUP, config.port)),
            mcast_iface,
        })
    }

    /// Transmit `payload` to the configured target address.
    pub fn send_unicast(&self, payload: &[u8]) -> Result<(), TransportError> {
        log::debug!(
            "[transport] -> {} ({} bytes, unicast)",
            self.unicast_dest,
            payload.len()
        );
        self.unicast
            .send_to(payload, self.unicast_dest)
            .map_err(TransportError::Send)?;
        Ok(())
    }

    /// Transmit `payload` to the SLP multicast group.
    pub fn send_multicast(&self, payload: &[u8]) -> Result<(), TransportError> {
        log::debug!(
            "[transport] -> {} ({} bytes, multicast)",
            self.multicast_dest,
            payload.len()
        );
        self.multicast
            .send_to(payload, self.multicast_dest)
            .map_err(TransportError::Send)?;
        Ok(())
    }

    /// Block until a socket is readable or `timeout` elapses.
    pub fn poll(&mut self, events: &mut Events, timeout: Duration) -> Result<(), TransportError> {
        self.poll
            .poll(events, Some(timeout))
            .map_err(TransportError::Poll)
    }

    /// Drain one datagram from the socket behind `token`.
    ///
    /// Returns `Ok(None)` when the socket has nothing more to give
    /// (spurious wakeup or already drained).
    pub fn try_recv(
        &self,
        token: Token,
        buf: &mut [u8; MAX_DATAGRAM_SIZE],
    ) -> Result<Option<(usize, SocketAddr)>, TransportError> {
        let socket = match token {
            MULTICAST => &self.multicast,
            _ => &self.unicast,
        };
        match socket.recv_from(buf) {
            Ok((len, source)) => Ok(Some((len, source))),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(TransportError::Recv(e)),
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        // Leave the group explicitly; closing the socket would get there
        // eventually but an aborted run should not linger in the group.
        let _ = self
            .multicast
            .leave_multicast_v4(&SLP_MULTICAST_GROUP, &self.mcast_iface);
        log::debug!("[transport] sockets released, multicast group left");
    }
}

/// socket2 -> mio construction shared by both sockets.
fn bind_ephemeral() -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    let bind_addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));
    socket.bind(&bind_addr.into())?;
    Ok(UdpSocket::from_std(socket.into()))
}
