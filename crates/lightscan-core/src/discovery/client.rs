//! Discovery client: one multicast scan round-trip.
//!
//! Lifecycle is configure → join → send → collect → close. The socket is owned
//! by the client, so every exit path (including `?` on a fatal error) releases it.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{timeout, Instant};

use super::socket::create_scan_socket;
use crate::config::ScanConfig;
use crate::error::{CoreError, DiscoveryError, SocketStep};
use crate::protocol::{parse_scan_response, Device, ScanRequest};

/// Receive buffer size. Large enough for any scan reply seen in practice.
const RECV_BUFFER_SIZE: usize = 2048;

pub struct DiscoveryClient {
    socket: UdpSocket,
    interface: Ipv4Addr,
}

impl DiscoveryClient {
    /// Create and configure the scan socket. Must be called inside a tokio runtime.
    pub fn configure_socket(
        response_port: u16,
        ttl: u32,
        interface: Ipv4Addr,
    ) -> Result<Self, DiscoveryError> {
        let std_socket = create_scan_socket(response_port, ttl, interface)?;
        let socket = UdpSocket::from_std(std_socket)
            .map_err(DiscoveryError::socket(SocketStep::Register))?;

        log::debug!(
            "scan socket bound to {:?} (ttl {}, interface {})",
            socket.local_addr().ok(),
            ttl,
            interface
        );

        Ok(Self { socket, interface })
    }

    /// Join `group` on the interface chosen at configure time.
    pub fn join_multicast_group(&self, group: Ipv4Addr) -> Result<(), DiscoveryError> {
        if !group.is_multicast() {
            return Err(DiscoveryError::MulticastJoin {
                group,
                interface: self.interface,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a multicast address",
                ),
            });
        }

        self.socket
            .join_multicast_v4(group, self.interface)
            .map_err(|source| DiscoveryError::MulticastJoin {
                group,
                interface: self.interface,
                source,
            })?;
        log::debug!("joined multicast group {} on {}", group, self.interface);
        Ok(())
    }

    /// Send the scan request datagram to `target`.
    pub async fn send_scan(&self, target: SocketAddrV4, payload: &[u8]) -> Result<(), DiscoveryError> {
        let sent = self
            .socket
            .send_to(payload, target)
            .await
            .map_err(|source| DiscoveryError::Send { target, source })?;

        if sent != payload.len() {
            return Err(DiscoveryError::Send {
                target,
                source: std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    format!("sent {} of {} bytes", sent, payload.len()),
                ),
            });
        }

        log::debug!("scan request sent to {} ({} bytes)", target, sent);
        Ok(())
    }

    /// Collect scan replies for `window`, calling `on_device` for each accepted device.
    ///
    /// The window is measured once from the start of collection; a steady
    /// stream of packets cannot extend it.
    pub async fn collect_responses<F>(&mut self, window: Duration, on_device: F) -> Vec<Device>
    where
        F: FnMut(&Device),
    {
        let now = Instant::now();
        // Far enough out that no scan will ever reach it.
        let deadline = now
            .checked_add(window)
            .unwrap_or_else(|| now + Duration::from_secs(86_400 * 365));
        collect_until(&self.socket, deadline, on_device).await
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Release the socket.
    pub fn close(self) {
        log::debug!("closing scan socket");
        drop(self.socket);
    }

    /// Run one full scan with `config`.
    ///
    /// Fatal errors are returned after the socket has been released.
    pub async fn scan<F>(config: &ScanConfig, on_device: F) -> Result<Vec<Device>, CoreError>
    where
        F: FnMut(&Device),
    {
        config.validate()?;
        let interface = config.interface.resolve()?;
        let request = ScanRequest::new(config.account_topic.clone());

        let mut client =
            Self::configure_socket(config.response_port, config.multicast_ttl, interface)?;
        client.join_multicast_group(config.multicast_address)?;
        client
            .send_scan(config.scan_target(), &request.to_bytes())
            .await?;

        let devices = client.collect_responses(config.timeout(), on_device).await;
        client.close();

        log::info!("scan finished with {} device(s)", devices.len());
        Ok(devices)
    }
}

/// Receive on `socket` until `deadline`, keeping every valid scan reply in arrival order.
pub async fn collect_until<F>(socket: &UdpSocket, deadline: Instant, mut on_device: F) -> Vec<Device>
where
    F: FnMut(&Device),
{
    let mut devices = Vec::new();
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        match timeout(remaining, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, addr))) => {
                if len == RECV_BUFFER_SIZE {
                    log::debug!(
                        "packet from {} filled the {}-byte buffer and may be truncated",
                        addr,
                        RECV_BUFFER_SIZE
                    );
                }
                match parse_scan_response(&buf[..len]) {
                    Ok(device) => {
                        log::debug!("scan reply from {}: {} at {}", addr, device.sku, device.ip);
                        on_device(&device);
                        devices.push(device);
                    }
                    Err(e) => {
                        log::debug!("skipping packet from {}: {}", addr, e);
                    }
                }
            }
            Ok(Err(e)) => {
                log::warn!("error receiving response: {}", e);
                break;
            }
            Err(_) => {
                // Window elapsed
                break;
            }
        }
    }

    devices
}
