//! Transport layer abstraction.
//!
//! A transport carries one request/response exchange: the client writes
//! the framed request in a single operation and reads back one datagram.
//! Transports are scoped resources: the client creates one per call and
//! drops it on every exit path, so the underlying socket is never reused
//! across calls.

mod udp;

pub use udp::UdpTransport;

use crate::error::Result;
use bytes::Bytes;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Client-side transport abstraction.
///
/// The send/receive split keeps the exchange linear and testable: send the
/// whole request buffer, then wait (bounded) for exactly one response
/// datagram.
pub trait Transport: Send + Sync {
    /// Send the full request buffer in one operation.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Receive one response datagram.
    ///
    /// - `request_id`: carried for error context only; correlation happens
    ///   at the client layer
    /// - `timeout`: hard bound on the wait; the transport never blocks
    ///   indefinitely
    ///
    /// Returns (response_data, source_address).
    fn recv(
        &self,
        request_id: i32,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send;

    /// The peer address this transport sends to and receives from.
    fn peer_addr(&self) -> SocketAddr;

    /// Local bind address.
    fn local_addr(&self) -> SocketAddr;
}
