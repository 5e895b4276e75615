// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire codec for Gree datagrams.
//!
//! Every datagram is a plain JSON [`Envelope`] whose `pack` field carries
//! the real payload: JSON text, padded and encrypted with the device
//! cipher, then base64 encoded.
//!
//! ```text
//! {"cid":"app","i":0,"pack":"<base64>","t":"pack","tcid":"<mac>","uid":0}
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;
use crate::types::Field;

use super::DeviceCipher;

/// Client id sent in every request.
pub const CLIENT_ID: &str = "app";

/// Envelope type tag for encrypted packs.
pub const PACK_TYPE: &str = "pack";

/// Outer, unencrypted datagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Client id; `"app"` in requests.
    #[serde(rename = "cid", default)]
    pub client_id: String,
    /// 1 for bind requests, 0 otherwise.
    #[serde(rename = "i", default)]
    pub sequence: u8,
    /// Base64 ciphertext.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack: Option<String>,
    /// Envelope type tag; `"pack"` in requests.
    #[serde(rename = "t", default)]
    pub kind: String,
    /// Target device MAC.
    #[serde(rename = "tcid", default)]
    pub target: String,
    /// Session uid, always 0.
    #[serde(default)]
    pub uid: u32,
}

impl Envelope {
    /// Creates a request envelope around an encoded pack.
    #[must_use]
    pub fn request(target: &str, pack: String, sequence: u8) -> Self {
        Self {
            client_id: CLIENT_ID.to_string(),
            sequence,
            pack: Some(pack),
            kind: PACK_TYPE.to_string(),
            target: target.to_string(),
            uid: 0,
        }
    }
}

/// Inner request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "lowercase")]
pub enum RequestPack {
    /// Asks the device for its key.
    Bind {
        /// Device MAC.
        mac: String,
        /// Session uid.
        uid: u32,
    },
    /// Reads the listed columns.
    Status {
        /// Columns to read.
        cols: Vec<Field>,
        /// Device MAC.
        mac: String,
    },
    /// Writes values to the listed columns.
    Cmd {
        /// Columns to write.
        opt: Vec<Field>,
        /// Values, aligned with `opt`.
        p: Vec<i64>,
    },
}

impl RequestPack {
    /// Returns the envelope sequence flag for this request.
    #[must_use]
    pub fn sequence(&self) -> u8 {
        u8::from(matches!(self, Self::Bind { .. }))
    }
}

/// Reply to a bind request.
#[derive(Debug, Clone, Deserialize)]
pub struct BindReply {
    /// Per-device key.
    #[serde(default)]
    pub key: Option<String>,
}

/// Reply to a status request.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReply {
    /// Columns echoed back by the device.
    #[serde(default)]
    pub cols: Vec<String>,
    /// Values, aligned with the requested columns.
    pub dat: Vec<Value>,
}

impl StatusReply {
    /// Returns the values as integers; non-numeric values are unknown.
    #[must_use]
    pub fn values(&self) -> Vec<Option<i64>> {
        self.dat.iter().map(integer_value).collect()
    }
}

/// Reply to a command request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandReply {
    /// Columns written.
    #[serde(default)]
    pub opt: Vec<String>,
    /// Values written.
    #[serde(default)]
    pub p: Vec<Value>,
    /// Result code, 200 on success.
    #[serde(default)]
    pub r: Option<i64>,
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Serializes, pads, encrypts and base64 encodes a payload.
///
/// # Errors
///
/// Returns `DecodeError::Json` if the payload cannot be serialized.
pub fn encode_pack<T: Serialize>(cipher: &DeviceCipher, payload: &T) -> Result<String, DecodeError> {
    let plaintext = serde_json::to_vec(payload)?;
    Ok(STANDARD.encode(cipher.encrypt(&plaintext)))
}

/// Base64 decodes, decrypts and parses a pack.
///
/// # Errors
///
/// Returns `DecodeError` if any stage fails.
pub fn decode_pack(cipher: &DeviceCipher, pack: &str) -> Result<Value, DecodeError> {
    let ciphertext = STANDARD.decode(pack.trim())?;
    let plaintext = cipher.decrypt(&ciphertext)?;
    let json = trim_plaintext(&plaintext)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Cuts decrypted text after its last `}` and drops control bytes.
///
/// Some firmware appends non-standard padding, so the PKCS#7 trailer is
/// not trusted.
///
/// # Errors
///
/// Returns `DecodeError::MissingClosingBrace` if there is no `}`.
pub fn trim_plaintext(plaintext: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let end = plaintext
        .iter()
        .rposition(|b| *b == b'}')
        .ok_or(DecodeError::MissingClosingBrace)?;
    Ok(plaintext[..=end]
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_control() || matches!(b, b'\t' | b'\n' | b'\r'))
        .collect())
}

/// Builds a complete request datagram.
///
/// # Errors
///
/// Returns `DecodeError::Json` if serialization fails.
pub fn encode_request(
    cipher: &DeviceCipher,
    target: &str,
    payload: &RequestPack,
) -> Result<Vec<u8>, DecodeError> {
    let pack = encode_pack(cipher, payload)?;
    let envelope = Envelope::request(target, pack, payload.sequence());
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parses a reply datagram and decrypts its pack.
///
/// # Errors
///
/// Returns `DecodeError` if the envelope is malformed, has no pack, or the
/// pack cannot be decrypted.
pub fn decode_response(cipher: &DeviceCipher, datagram: &[u8]) -> Result<Value, DecodeError> {
    let envelope: Envelope = serde_json::from_slice(datagram)?;
    let pack = envelope
        .pack
        .ok_or_else(|| DecodeError::MissingField("pack".to_string()))?;
    decode_pack(cipher, &pack)
}

/// Converts a decoded pack into a typed reply.
///
/// # Errors
///
/// Returns `DecodeError::Json` if the pack does not match the reply shape.
pub fn parse_reply<T: DeserializeOwned>(pack: Value) -> Result<T, DecodeError> {
    Ok(serde_json::from_value(pack)?)
}
