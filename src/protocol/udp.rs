// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UDP transport for Gree devices.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;

use crate::error::ProtocolError;

use super::Transport;

/// Size of the receive buffer; status replies can be large.
pub const RECV_BUFFER_SIZE: usize = 64_000;

/// One-shot UDP request/reply transport.
///
/// Each exchange binds a fresh socket connected to the device, sends one
/// datagram, waits for one reply and drops the socket. Datagrams from any
/// other address are discarded by the connected socket. No state survives
/// between calls.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use gree_lib::protocol::{Transport, UdpTransport};
///
/// # async fn example() -> Result<(), gree_lib::ProtocolError> {
/// let transport = UdpTransport::new("192.168.1.60", 7000, Duration::from_secs(10));
/// let reply = transport.exchange(br#"{"t":"scan"}"#).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UdpTransport {
    host: String,
    port: u16,
    timeout: Duration,
}

impl UdpTransport {
    /// Creates a transport for the given device address.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Returns the device host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the device port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the reply timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn resolve(&self) -> Result<SocketAddr, ProtocolError> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| ProtocolError::InvalidAddress(format!("{}: {e}", self.host)))?
            .next()
            .ok_or_else(|| ProtocolError::InvalidAddress(self.host.clone()))
    }

    async fn send_and_receive(
        &self,
        target: SocketAddr,
        request: &[u8],
    ) -> Result<Vec<u8>, ProtocolError> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        socket.send(request).await?;

        let mut buffer = vec![0u8; RECV_BUFFER_SIZE];
        let len = socket.recv(&mut buffer).await?;
        buffer.truncate(len);

        tracing::debug!(%target, len, "Received UDP datagram");

        Ok(buffer)
    }
}

impl Transport for UdpTransport {
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        let target = self.resolve().await?;

        tracing::debug!(%target, len = request.len(), "Sending UDP datagram");

        // Safe: timeout in practical use will never exceed u64::MAX milliseconds
        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.timeout.as_millis() as u64;

        tokio::time::timeout(self.timeout, self.send_and_receive(target, request))
            .await
            .map_err(|_| ProtocolError::Timeout(timeout_ms))?
    }
}
