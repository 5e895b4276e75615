// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Gree library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: value validation, UDP communication, ciphertext and JSON
//! decoding.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a device reply.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Returns `true` if this error is a request timeout.
    ///
    /// Timeouts are the only failures the retry policy retries.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Protocol(ProtocolError::Timeout(_)))
    }

    /// Returns `true` if this error came from decoding a device reply.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A raw device value does not map to any known variant.
    #[error("unknown {kind} value: {value}")]
    UnknownVariant {
        /// The kind of value being decoded.
        kind: &'static str,
        /// The raw value.
        value: i64,
    },

    /// A display name does not map to any known variant.
    #[error("unknown {kind} name: {name}")]
    UnknownName {
        /// The kind of value being parsed.
        kind: &'static str,
        /// The name that was provided.
        name: String,
    },

    /// A device MAC address is malformed.
    #[error("invalid MAC address: {0}")]
    InvalidMac(String),
}

/// Errors related to UDP communication with the device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// No reply arrived before the timeout elapsed.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Socket-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device address could not be resolved.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The bind reply did not carry a device key.
    #[error("bind response is missing the device key")]
    MissingDeviceKey,

    /// The device key has the wrong length.
    #[error("device key must be 16 bytes, got {0}")]
    InvalidDeviceKey(usize),
}

/// Errors related to decoding device replies.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The encrypted pack is not valid base64.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The ciphertext is not a whole number of cipher blocks.
    #[error("ciphertext length {0} is not a multiple of the block size")]
    InvalidCiphertextLength(usize),

    /// The decrypted pack contains no closing brace.
    #[error("decrypted pack contains no JSON object")]
    MissingClosingBrace,

    /// Expected field is missing from the reply.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected reply format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 16,
            max: 30,
            actual: 45,
        };
        assert_eq!(err.to_string(), "value 45 is out of range [16, 30]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidMac("zz".to_string()).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidMac(_))));
    }

    #[test]
    fn decode_error_display() {
        let err = DecodeError::MissingField("pack".to_string());
        assert_eq!(err.to_string(), "missing field in response: pack");
    }

    #[test]
    fn timeout_classification() {
        let timeout: Error = ProtocolError::Timeout(10_000).into();
        assert!(timeout.is_timeout());
        assert!(!timeout.is_decode());

        let io: Error = ProtocolError::Io(std::io::Error::other("boom")).into();
        assert!(!io.is_timeout());

        let decode: Error = DecodeError::MissingClosingBrace.into();
        assert!(decode.is_decode());
    }
}
