//! Socket setup for the scan.
//!
//! One socket both sends the request and receives the replies, so it is bound
//! to the response port before anything goes out.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{DiscoveryError, SocketStep};

/// Create the scan socket: SO_REUSEADDR, bound to `response_port`, with the
/// multicast TTL and outgoing interface applied.
///
/// SO_REUSEPORT is not set, so a port held by another process is a bind error.
pub fn create_scan_socket(
    response_port: u16,
    ttl: u32,
    interface: Ipv4Addr,
) -> Result<std::net::UdpSocket, DiscoveryError> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(DiscoveryError::socket(SocketStep::Create))?;

    socket
        .set_reuse_address(true)
        .map_err(DiscoveryError::socket(SocketStep::ReuseAddress))?;

    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, response_port));
    socket
        .bind(&addr.into())
        .map_err(DiscoveryError::socket(SocketStep::Bind))?;

    socket
        .set_multicast_ttl_v4(ttl)
        .map_err(DiscoveryError::socket(SocketStep::MulticastTtl))?;

    socket
        .set_multicast_if_v4(&interface)
        .map_err(DiscoveryError::socket(SocketStep::MulticastInterface))?;

    socket
        .set_nonblocking(true)
        .map_err(DiscoveryError::socket(SocketStep::NonBlocking))?;

    Ok(socket.into())
}
