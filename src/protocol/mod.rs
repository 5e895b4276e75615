// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gree local-network protocol.
//!
//! Devices listen on UDP port 7000. Each request is one JSON datagram and
//! each reply is one JSON datagram; the useful payload is an encrypted
//! `pack` (see [`codec`]).
//!
//! # Layers
//!
//! - [`Transport`]: one request datagram in, one reply datagram out
//! - [`UdpTransport`]: the UDP implementation
//! - [`RetryPolicy`]: bounded retry on timeouts
//! - [`GreeClient`]: bind, status and command requests for one device

mod cipher;
mod client;
pub mod codec;
mod retry;
mod udp;

use std::future::Future;
use std::time::Duration;

pub use cipher::{BLOCK_SIZE, DeviceCipher, GENERIC_KEY};
pub use client::GreeClient;
pub use retry::RetryPolicy;
pub use udp::{RECV_BUFFER_SIZE, UdpTransport};

use crate::error::ProtocolError;

/// UDP port Gree devices listen on.
pub const DEFAULT_PORT: u16 = 7000;

/// Default wait for a reply datagram.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request/reply exchange with a device.
///
/// Implementations send one datagram and return the first reply. A missing
/// reply must surface as [`ProtocolError::Timeout`] so the retry policy can
/// tell it apart from other failures.
pub trait Transport: Send + Sync {
    /// Sends `request` and waits for one reply.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if no reply arrives in time, or an
    /// I/O error if the datagram cannot be sent.
    fn exchange(
        &self,
        request: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, ProtocolError>> + Send;
}
