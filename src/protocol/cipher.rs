// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! AES-128-ECB cipher used for the encrypted pack.
//!
//! Every device shares a well-known generic key used only to bind. The bind
//! reply carries a per-device key that encrypts all later requests.

use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::error::{DecodeError, ProtocolError};

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Key shared by all devices of the product line, used for binding.
pub const GENERIC_KEY: &[u8; 16] = b"a3K8Bx%2r8Y7#xDh";

/// Symmetric cipher context for one device.
#[derive(Clone)]
pub struct DeviceCipher {
    aes: Aes128,
}

impl DeviceCipher {
    /// Creates a cipher from a 16-byte key.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidDeviceKey` if the key is not 16 bytes.
    pub fn new(key: &[u8]) -> Result<Self, ProtocolError> {
        let aes = Aes128::new_from_slice(key)
            .map_err(|_| ProtocolError::InvalidDeviceKey(key.len()))?;
        Ok(Self { aes })
    }

    /// Creates the cipher keyed with [`GENERIC_KEY`].
    #[must_use]
    pub fn generic() -> Self {
        Self {
            aes: Aes128::new(GENERIC_KEY.into()),
        }
    }

    /// Pads and encrypts a plaintext.
    #[must_use]
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut buffer = pad(plaintext);
        for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
            self.aes.encrypt_block(GenericArray::from_mut_slice(block));
        }
        buffer
    }

    /// Decrypts a ciphertext. Padding is left in place.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidCiphertextLength` if the ciphertext is
    /// empty or not a whole number of blocks.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecodeError> {
        if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_SIZE) {
            return Err(DecodeError::InvalidCiphertextLength(ciphertext.len()));
        }
        let mut buffer = ciphertext.to_vec();
        for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
            self.aes.decrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(buffer)
    }
}

impl std::fmt::Debug for DeviceCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceCipher").finish_non_exhaustive()
    }
}

/// Pads to a whole number of blocks, PKCS#7 style.
///
/// Each pad byte holds the pad length. Input that is already aligned gets
/// a full extra block.
#[must_use]
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    // Safe: pad_len is in 1..=16
    #[allow(clippy::cast_possible_truncation)]
    let pad_byte = pad_len as u8;
    padded.resize(data.len() + pad_len, pad_byte);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_adds_full_block_when_aligned() {
        let padded = pad(&[b'x'; 16]);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|b| *b == 16));
    }

    #[test]
    fn pad_partial_block() {
        let padded = pad(b"hello");
        assert_eq!(padded.len(), 16);
        assert!(padded[5..].iter().all(|b| *b == 11));
    }

    #[test]
    fn pad_empty_input() {
        assert_eq!(pad(&[]), vec![16u8; 16]);
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let cipher = DeviceCipher::new(b"0123456789abcdef").unwrap();
        let plaintext = b"{\"t\":\"status\"}";
        let ciphertext = cipher.encrypt(plaintext);
        assert_eq!(ciphertext.len() % BLOCK_SIZE, 0);
        assert_ne!(&ciphertext[..plaintext.len()], plaintext);

        let decrypted = cipher.decrypt(&ciphertext).unwrap();
        assert_eq!(decrypted, pad(plaintext));
    }

    #[test]
    fn rejects_bad_key_length() {
        assert!(matches!(
            DeviceCipher::new(b"short"),
            Err(ProtocolError::InvalidDeviceKey(5))
        ));
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        let cipher = DeviceCipher::generic();
        assert!(cipher.decrypt(&[0; 15]).is_err());
        assert!(cipher.decrypt(&[]).is_err());
    }

    #[test]
    fn generic_and_device_keys_differ() {
        let generic = DeviceCipher::generic();
        let device = DeviceCipher::new(b"0123456789abcdef").unwrap();
        assert_ne!(generic.encrypt(b"{}"), device.encrypt(b"{}"));
    }
}
