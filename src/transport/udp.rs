//! UDP transport implementation.

use super::Transport;
use crate::error::{Error, Result};
use crate::util::bind_ephemeral_udp_socket;
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Maximum UDP datagram payload; covers the largest SNMP message any
/// agent can send (RFC 3417 caps at 65507 octets over UDP).
const RECV_BUF_SIZE: usize = 65535;

/// UDP transport for a single exchange with one target.
///
/// Owns a connected ephemeral socket. Dropping the transport closes the
/// socket, which happens on every exit path of a client call.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Connect to a target address.
    ///
    /// Binds an ephemeral UDP socket of the target's address family and
    /// connects it, so stray datagrams from other sources are filtered by
    /// the kernel.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        tracing::debug!(snmp.target = %target, "connecting UDP transport");

        let socket = bind_ephemeral_udp_socket(target).map_err(|e| Error::Connect {
            target: Some(target),
            source: e,
        })?;

        socket.connect(target).await.map_err(|e| Error::Connect {
            target: Some(target),
            source: e,
        })?;

        let local_addr = socket.local_addr().map_err(|e| Error::Connect {
            target: Some(target),
            source: e,
        })?;

        tracing::debug!(
            snmp.target = %target,
            snmp.local_addr = %local_addr,
            "UDP transport connected"
        );

        Ok(Self {
            socket,
            target,
            local_addr,
        })
    }

    /// Connect with a bound on socket setup time.
    pub async fn connect_timeout(target: SocketAddr, connect_timeout: Duration) -> Result<Self> {
        match timeout(connect_timeout, Self::connect(target)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                target: Some(target),
                elapsed: connect_timeout,
                request_id: 0,
            }),
        }
    }
}

impl Transport for UdpTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::trace!(
            snmp.target = %self.target,
            snmp.bytes = data.len(),
            "UDP send"
        );
        let written = self.socket.send(data).await.map_err(|e| Error::Send {
            target: Some(self.target),
            source: e,
        })?;
        if written != data.len() {
            return Err(Error::Send {
                target: Some(self.target),
                source: std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    format!("short write: {} of {} bytes", written, data.len()),
                ),
            });
        }
        Ok(())
    }

    async fn recv(&self, request_id: i32, recv_timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        tracing::trace!(
            snmp.target = %self.target,
            snmp.request_id = request_id,
            snmp.timeout_ms = recv_timeout.as_millis() as u64,
            "UDP recv waiting"
        );

        let mut buf = vec![0u8; RECV_BUF_SIZE];

        match timeout(recv_timeout, self.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                tracing::trace!(
                    snmp.target = %self.target,
                    snmp.bytes = len,
                    "UDP recv complete"
                );
                Ok((Bytes::from(buf), self.target))
            }
            Ok(Err(e)) => {
                tracing::trace!(
                    snmp.target = %self.target,
                    error = %e,
                    "UDP recv error"
                );
                Err(Error::Recv {
                    target: Some(self.target),
                    source: e,
                })
            }
            Err(_) => {
                tracing::trace!(
                    snmp.target = %self.target,
                    snmp.request_id = request_id,
                    "UDP recv timeout"
                );
                Err(Error::Timeout {
                    target: Some(self.target),
                    elapsed: recv_timeout,
                    request_id,
                })
            }
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}
