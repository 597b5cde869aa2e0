//! The record types making up a horcrux shard, and the options that
//! parameterize split/bind.

use serde::{Deserialize, Serialize};

/// The shard header's format version. Bumped if the wire format ever
/// changes incompatibly.
pub const CURRENT_VERSION: u32 = 1;

/// One Shamir share of the AES key, as carried in a shard header.
///
/// `y` is encoded as a JSON array of integers (not base64), so a shard's
/// header can be read and diffed without decoding anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFragment {
    pub x: u8,
    pub y: Vec<u8>,
}

impl From<horcrux_cryptography::Share> for KeyFragment {
    fn from(share: horcrux_cryptography::Share) -> Self {
        KeyFragment {
            x: share.x,
            y: share.y,
        }
    }
}

impl From<KeyFragment> for horcrux_cryptography::Share {
    fn from(fragment: KeyFragment) -> Self {
        horcrux_cryptography::Share {
            x: fragment.x,
            y: fragment.y,
        }
    }
}

/// The text-encoded JSON header prefixing every shard's binary body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardHeader {
    /// The bare filename (path separators stripped) recorded at split time.
    pub original_filename: String,
    /// Wall-clock milliseconds at split time; identifies a split run.
    pub timestamp: u64,
    /// 1-based position within the split.
    pub index: u8,
    /// Total number of shards produced by the split (`N`).
    pub total: u8,
    /// Number of shards required to reconstruct (`K`).
    pub threshold: u8,
    pub key_fragment: KeyFragment,
    pub version: u32,
}

/// A single horcrux: a header plus its binary content. `content` is the
/// full ciphertext in replicated mode (`threshold < total`), or one stripe
/// of it in multiplexed mode (`threshold == total`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub header: ShardHeader,
    pub content: Vec<u8>,
}

/// Options controlling how a file or buffer is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Total number of shards to produce (`2..=99`).
    pub total: u8,
    /// Shards required to reconstruct (`2..=total`). Equal to `total`
    /// selects multiplexed mode; less than `total` selects replicated mode.
    pub threshold: u8,
}

/// Options controlling a bind (reconstruction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Overrides the filename recorded in [`BindResult`]; does not affect
    /// which path the caller ultimately writes to.
    pub output_filename: Option<String>,
}

/// The result of a successful split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub horcruxes: Vec<Shard>,
    pub original_size: u64,
    pub total_size: u64,
}

/// The result of a successful bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindResult {
    pub data: Vec<u8>,
    pub filename: String,
    pub horcruxes_used: u8,
}
