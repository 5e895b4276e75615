// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request-level client for a single Gree device.

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Error, ProtocolError};
use crate::state::{FieldMap, PendingDelta};
use crate::types::{DeviceMac, Field};

use super::codec::{self, BindReply, CommandReply, RequestPack, StatusReply};
use super::{DeviceCipher, RetryPolicy, Transport, UdpTransport};

/// Client for one Gree device.
///
/// The client binds lazily: the first status or command request performs
/// the bind handshake with the generic key and caches the device cipher
/// for later requests. Every request goes through the [`RetryPolicy`].
///
/// If a reply cannot be decoded with the cached device cipher, the cipher
/// is dropped so the next request binds again. The failing request still
/// returns its error.
///
/// # Examples
///
/// ```no_run
/// use gree_lib::protocol::GreeClient;
/// use gree_lib::types::Field;
///
/// # async fn example() -> gree_lib::Result<()> {
/// let client = GreeClient::udp("192.168.1.60", "c8:f7:42:aa:bb:cc")?;
/// let fields = client.status().await?;
/// println!("target: {:?}", fields.get(Field::SetTem));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GreeClient<T = UdpTransport> {
    transport: T,
    mac: DeviceMac,
    retry: RetryPolicy,
    cipher: Mutex<Option<DeviceCipher>>,
}

impl GreeClient<UdpTransport> {
    /// Creates a UDP client with default port, timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns error if the MAC address is malformed.
    pub fn udp(host: impl Into<String>, mac: &str) -> Result<Self, Error> {
        Ok(crate::DeviceConfig::new(host, mac)?.into_client())
    }
}

impl<T: Transport> GreeClient<T> {
    /// Creates a client over the given transport.
    #[must_use]
    pub fn new(transport: T, mac: DeviceMac, retry: RetryPolicy) -> Self {
        Self {
            transport,
            mac,
            retry,
            cipher: Mutex::new(None),
        }
    }

    /// Seeds the client with a known device cipher, skipping the bind.
    #[must_use]
    pub fn with_cipher(self, cipher: DeviceCipher) -> Self {
        *self.cipher.lock() = Some(cipher);
        self
    }

    /// Returns the device MAC.
    #[must_use]
    pub fn mac(&self) -> &DeviceMac {
        &self.mac
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns `true` if a device cipher is cached.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.cipher.lock().is_some()
    }

    /// Drops the cached device cipher; the next request binds again.
    pub fn invalidate_cipher(&self) {
        if self.cipher.lock().take().is_some() {
            tracing::info!(mac = %self.mac, "Device cipher invalidated");
        }
    }

    /// Performs the bind handshake and caches the device cipher.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MissingDeviceKey` if the reply has no key,
    /// or any transport or decode error.
    pub async fn bind(&self) -> Result<DeviceCipher, Error> {
        let request = RequestPack::Bind {
            mac: self.mac.to_string(),
            uid: 0,
        };
        let reply: BindReply =
            codec::parse_reply(self.request(&DeviceCipher::generic(), &request).await?)?;
        let key = reply.key.ok_or(ProtocolError::MissingDeviceKey)?;
        let cipher = DeviceCipher::new(key.as_bytes())?;

        *self.cipher.lock() = Some(cipher.clone());
        tracing::info!(mac = %self.mac, "Bound to device");

        Ok(cipher)
    }

    /// Polls every field.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the reply is malformed.
    pub async fn status(&self) -> Result<FieldMap, Error> {
        let request = RequestPack::Status {
            cols: Field::ALL.to_vec(),
            mac: self.mac.to_string(),
        };
        let reply: StatusReply = codec::parse_reply(self.device_request(&request).await?)?;
        Ok(FieldMap::from_positional(&reply.values())?)
    }

    /// Writes the given field values.
    ///
    /// Fields are sent in wire order with their values aligned. An empty
    /// delta sends nothing.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the reply is malformed.
    pub async fn send_command(&self, delta: &PendingDelta) -> Result<CommandReply, Error> {
        if delta.is_empty() {
            return Ok(CommandReply::default());
        }
        let request = RequestPack::Cmd {
            opt: delta.fields(),
            p: delta.values(),
        };
        let reply: CommandReply = codec::parse_reply(self.device_request(&request).await?)?;

        if reply.r.is_some_and(|r| r != 200) {
            tracing::warn!(mac = %self.mac, result = ?reply.r, "Device returned unexpected result code");
        }

        Ok(reply)
    }

    async fn device_cipher(&self) -> Result<DeviceCipher, Error> {
        let cached = self.cipher.lock().clone();
        match cached {
            Some(cipher) => Ok(cipher),
            None => self.bind().await,
        }
    }

    async fn device_request(&self, request: &RequestPack) -> Result<Value, Error> {
        let cipher = self.device_cipher().await?;
        let result = self.request(&cipher, request).await;
        if result.as_ref().is_err_and(Error::is_decode) {
            self.invalidate_cipher();
        }
        result
    }

    async fn request(&self, cipher: &DeviceCipher, request: &RequestPack) -> Result<Value, Error> {
        tracing::debug!(mac = %self.mac, ?request, "Gree request");

        let datagram = codec::encode_request(cipher, self.mac.as_str(), request)?;
        let reply = self
            .retry
            .run(|| async {
                let response = self.transport.exchange(&datagram).await?;
                Ok(codec::decode_response(cipher, &response)?)
            })
            .await?;

        tracing::debug!(mac = %self.mac, %reply, "Gree response");

        Ok(reply)
    }
}
