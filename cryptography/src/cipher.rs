// SPDX-License-Identifier: Apache-2.0

//! AES-256-OFB encryption with a fixed all-zero 16-byte IV.
//!
//! The fixed IV is a deliberate interoperability constraint: it lets two
//! independent implementations produce byte-identical ciphertext for the
//! same plaintext and key. Output-feedback mode makes encryption and
//! decryption the same operation (XOR with a keystream), so `encrypt` and
//! `decrypt` below are literally the same function under two names.
//!
//! Security rests entirely on the freshness of the per-split key (see
//! [`crate::shamir`]); this key must never be reused across splits, and
//! this module does not cache or remember any key it is given.

use aes::Aes256;
use cipher::{KeyIvInit, StreamCipher as _};
use ofb::Ofb;
use thiserror::Error;

type AesOfb = Ofb<Aes256>;

const KEY_LEN: usize = 32;
const ZERO_IV: [u8; 16] = [0u8; 16];

/// Errors from the symmetric cipher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The supplied key was not exactly 32 bytes (AES-256).
    #[error("key must be exactly {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),
}

fn new_cipher(key: &[u8]) -> Result<AesOfb, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    Ok(AesOfb::new(key.into(), &ZERO_IV.into()))
}

/// Encrypts `plaintext` under `key` using AES-256-OFB with the fixed IV.
///
/// Deterministic given `(plaintext, key)`, by construction of OFB with a
/// fixed IV.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    transform(plaintext, key)
}

/// Decrypts `ciphertext` under `key`. OFB is self-inverse, so this is the
/// same transform as [`encrypt`].
pub fn decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    transform(ciphertext, key)
}

fn transform(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let mut cipher = new_cipher(key)?;
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}

/// An incremental AES-256-OFB transform over a sequence of chunks, for the
/// streaming (file-based) path. Produces byte-identical output to
/// [`encrypt`]/[`decrypt`] given the same key and the same bytes fed in the
/// same order, regardless of how those bytes are chunked.
pub struct CipherStream {
    inner: AesOfb,
}

impl CipherStream {
    /// Builds a new stream transform under `key`.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Ok(CipherStream {
            inner: new_cipher(key)?,
        })
    }

    /// Transforms `chunk` in place, continuing the keystream from wherever
    /// the previous call (if any) left off.
    pub fn apply(&mut self, chunk: &mut [u8]) {
        self.inner.apply_keystream(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x42; 32];

    #[test]
    fn decrypt_undoes_encrypt() {
        let plaintext = b"Hello, Horcrux!".to_vec();
        let ciphertext = encrypt(&plaintext, &KEY).unwrap();
        let recovered = decrypt(&ciphertext, &KEY).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn encrypt_is_deterministic_for_fixed_key() {
        let plaintext = b"same input every time".to_vec();
        let a = encrypt(&plaintext, &KEY).unwrap();
        let b = encrypt(&plaintext, &KEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_wrong_key_length() {
        let short_key = [0u8; 16];
        assert_eq!(
            encrypt(b"data", &short_key),
            Err(CipherError::InvalidKeyLength(16))
        );
    }

    #[test]
    fn streaming_matches_one_shot_regardless_of_chunking() {
        let plaintext: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let one_shot = encrypt(&plaintext, &KEY).unwrap();

        let mut stream = CipherStream::new(&KEY).unwrap();
        let mut streamed = plaintext.clone();
        for chunk in streamed.chunks_mut(37) {
            stream.apply(chunk);
        }

        assert_eq!(streamed, one_shot);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let ciphertext = encrypt(&[], &KEY).unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(decrypt(&ciphertext, &KEY).unwrap(), Vec::<u8>::new());
    }
}
