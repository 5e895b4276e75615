// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device MAC address.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The MAC-like token identifying a device on the wire.
///
/// The device expects the address as bare lowercase hex digits; separators
/// are stripped on construction.
///
/// # Examples
///
/// ```
/// use gree_lib::types::DeviceMac;
///
/// let mac = DeviceMac::new("AC:0B:FB:12:34:56").unwrap();
/// assert_eq!(mac.as_str(), "ac0bfb123456");
/// assert_eq!(mac.formatted(), "ac:0b:fb:12:34:56");
///
/// assert!(DeviceMac::new("not-a-mac").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeviceMac(String);

impl DeviceMac {
    /// Number of hex digits in a normalized address.
    pub const LEN: usize = 12;

    /// Normalizes and validates a MAC address.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMac` unless the address consists of
    /// exactly 12 hex digits once `:` and `-` separators are removed.
    pub fn new(mac: &str) -> Result<Self, ValueError> {
        let normalized: String = mac
            .chars()
            .filter(|c| !matches!(c, ':' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized.len() != Self::LEN || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValueError::InvalidMac(mac.to_string()));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address in colon-separated form.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.0
            .as_bytes()
            .chunks(2)
            .map(|pair| String::from_utf8_lossy(pair).into_owned())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for DeviceMac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceMac {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DeviceMac {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators() {
        assert_eq!(
            DeviceMac::new("c8:f7:42:aa:bb:cc").unwrap().as_str(),
            "c8f742aabbcc"
        );
        assert_eq!(
            DeviceMac::new("C8-F7-42-AA-BB-CC").unwrap().as_str(),
            "c8f742aabbcc"
        );
        assert_eq!(
            DeviceMac::new("c8f742aabbcc").unwrap().as_str(),
            "c8f742aabbcc"
        );
    }

    #[test]
    fn rejects_malformed() {
        assert!(DeviceMac::new("").is_err());
        assert!(DeviceMac::new("c8:f7:42:aa:bb").is_err());
        assert!(DeviceMac::new("zz:f7:42:aa:bb:cc").is_err());
    }

    #[test]
    fn formatted_form() {
        let mac: DeviceMac = "c8f742aabbcc".parse().unwrap();
        assert_eq!(mac.formatted(), "c8:f7:42:aa:bb:cc");
    }
}
