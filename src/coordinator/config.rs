// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration.

use std::time::Duration;

use crate::error::ValueError;
use crate::protocol::{DEFAULT_PORT, DEFAULT_TIMEOUT, GreeClient, RetryPolicy, UdpTransport};
use crate::types::DeviceMac;

use super::{Coordinator, MIN_POLL_INTERVAL};

/// Connection and polling settings for one device.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use gree_lib::DeviceConfig;
///
/// let config = DeviceConfig::new("192.168.1.60", "C8:F7:42:AA:BB:CC")?
///     .with_name("Living room")
///     .with_timeout(Duration::from_secs(5))
///     .with_poll_interval(Duration::from_secs(30));
///
/// assert_eq!(config.mac().as_str(), "c8f742aabbcc");
/// assert_eq!(config.port(), 7000);
/// assert_eq!(config.max_attempts(), 10);
/// # Ok::<(), gree_lib::ValueError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    host: String,
    port: u16,
    mac: DeviceMac,
    timeout: Duration,
    retry: RetryPolicy,
    poll_interval: Duration,
    name: Option<String>,
}

impl DeviceConfig {
    /// Default interval between reconciles.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a configuration with default port, timeout, retry budget
    /// and poll interval.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMac` if `mac` is not 12 hex digits once
    /// separators are removed.
    pub fn new(host: impl Into<String>, mac: &str) -> Result<Self, ValueError> {
        Ok(Self {
            host: host.into(),
            port: DEFAULT_PORT,
            mac: DeviceMac::new(mac)?,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            name: None,
        })
    }

    /// Sets the UDP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the reply timeout of each attempt.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of attempts per request.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry = RetryPolicy::new(max_attempts);
        self
    }

    /// Sets the interval between polling reconciles.
    ///
    /// Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Sets a name used in log messages.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the device host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the UDP port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the normalized device MAC.
    #[must_use]
    pub fn mac(&self) -> &DeviceMac {
        &self.mac
    }

    /// Returns the reply timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of attempts per request.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.retry.max_attempts()
    }

    /// Returns the retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the configured name, or the MAC if none was set.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.mac.to_string())
    }

    /// Builds a UDP client for this device.
    #[must_use]
    pub fn into_client(self) -> GreeClient<UdpTransport> {
        let transport = UdpTransport::new(self.host, self.port, self.timeout);
        GreeClient::new(transport, self.mac, self.retry)
    }

    /// Builds a coordinator for this device.
    #[must_use]
    pub fn into_coordinator(self) -> Coordinator<UdpTransport> {
        let name = self.name();
        let interval = self.poll_interval;
        Coordinator::new(self.into_client(), interval).with_name(name)
    }
}
