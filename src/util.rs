//! Internal utilities.

use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

/// Create an ephemeral UDP socket for connecting to a target.
///
/// Binds to `0.0.0.0:0` (IPv4) or `[::]:0` (IPv6) depending on the target
/// address family. For IPv6 sockets, sets `IPV6_V6ONLY = true` so the
/// socket only handles IPv6 traffic and does not accept IPv4-mapped
/// addresses.
pub(crate) fn bind_ephemeral_udp_socket(target: SocketAddr) -> io::Result<UdpSocket> {
    let (domain, bind_addr): (Domain, SocketAddr) = if target.is_ipv6() {
        (Domain::IPV6, "[::]:0".parse().unwrap())
    } else {
        (Domain::IPV4, "0.0.0.0:0".parse().unwrap())
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    if target.is_ipv6() {
        socket.set_only_v6(true)?;
    }

    // Non-blocking before handing the fd to tokio
    socket.set_nonblocking(true)?;

    socket.bind(&bind_addr.into())?;

    UdpSocket::from_std(socket.into())
}
