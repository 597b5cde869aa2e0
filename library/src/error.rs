//! The error kinds surfaced by split, bind, and auto-discovery.
//!
//! Every error the engine can produce is a variant of [`HorcruxError`], so
//! callers handle one type regardless of which component failed. No variant
//! carries key material or plaintext.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HorcruxError {
    // --- Configuration ---
    #[error("total shares must be between 2 and 99")]
    InvalidTotal,
    #[error("threshold must be between 2 and 99")]
    InvalidThreshold,
    #[error("threshold {threshold} exceeds total {total}")]
    ThresholdExceedsTotal { threshold: u8, total: u8 },

    // --- Input ---
    #[error("path does not refer to a regular file")]
    NotAFile,
    #[error("secret must not be empty")]
    EmptySecret,

    // --- Format ---
    #[error("shard is missing the header marker")]
    MissingHeaderMarker,
    #[error("shard is missing the body marker")]
    MissingBodyMarker,
    #[error("shard header is malformed: {0}")]
    MalformedHeader(String),
    #[error("shard header version {0} is not supported")]
    UnsupportedVersion(u32),

    // --- Set validation ---
    #[error("no horcrux shards were found")]
    NoShards,
    #[error("shards originate from different files")]
    DifferentFiles,
    #[error("shards originate from different split runs")]
    DifferentSplitRuns,
    #[error("shards disagree on the total share count")]
    InconsistentTotal,
    #[error("shards disagree on the reconstruction threshold")]
    InconsistentThreshold,
    #[error("duplicate shard index {0}")]
    DuplicateIndex(u8),
    #[error("ambiguous shard sets found for files: {0:?}")]
    AmbiguousShardSets(Vec<String>),
    #[error("insufficient shards: have {have}, need {need}")]
    InsufficientShards { have: usize, need: usize },

    // --- Cryptographic ---
    #[error("key must be exactly 32 bytes, got {0}")]
    InvalidKeyLength(usize),
    #[error("internal Shamir state corrupted: two shares share an x-coordinate")]
    DivisionByZero,

    // --- I/O ---
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<horcrux_cryptography::ShamirError> for HorcruxError {
    fn from(err: horcrux_cryptography::ShamirError) -> Self {
        use horcrux_cryptography::ShamirError as E;
        match err {
            E::EmptySecret => HorcruxError::EmptySecret,
            E::InvalidThreshold => HorcruxError::InvalidThreshold,
            E::TooManyShares => HorcruxError::InvalidTotal,
            E::EmptyShares => HorcruxError::NoShards,
            E::LengthMismatch => HorcruxError::DivisionByZero,
            E::DivisionByZero => HorcruxError::DivisionByZero,
        }
    }
}

impl From<horcrux_cryptography::CipherError> for HorcruxError {
    fn from(err: horcrux_cryptography::CipherError) -> Self {
        match err {
            horcrux_cryptography::CipherError::InvalidKeyLength(len) => {
                HorcruxError::InvalidKeyLength(len)
            }
        }
    }
}

impl From<horcrux_cryptography::Gf256Error> for HorcruxError {
    fn from(_: horcrux_cryptography::Gf256Error) -> Self {
        HorcruxError::DivisionByZero
    }
}
