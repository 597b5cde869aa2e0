//! The split engine: turns a plaintext buffer or file into `total`
//! shards, `threshold` of which reconstruct it.
//!
//! `split_buffer` works entirely in memory. `split_file` delegates to
//! [`super::stream`] for the actual encrypt/demultiplex pipeline, so a
//! large file is never fully duplicated in memory as both plaintext and
//! ciphertext at once — see the module doc there.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use horcrux_cryptography::{cipher, demux, shamir};

use crate::error::HorcruxError;
use crate::platform::{AsRngCore, Filesystem, SecureRandom};
use crate::types::{Shard, ShardHeader, SplitOptions, SplitResult, CURRENT_VERSION};

use super::stream;

const KEY_LEN: usize = 32;

/// Splits `data` (held fully in memory) into `opts.total` shards under
/// `filename`, drawing the key and Shamir x-coordinates from `rng`.
pub fn split_buffer(
    data: &[u8],
    filename: &str,
    opts: SplitOptions,
    rng: &mut dyn SecureRandom,
) -> Result<SplitResult, HorcruxError> {
    split_buffer_with_rng(data, filename, opts, &mut AsRngCore(rng))
}

/// Splits the file at `path` into `opts.total` shards, via the platform's
/// [`Filesystem`] and a streaming encrypt/demultiplex pipeline, drawing the
/// key and Shamir x-coordinates from `rng`.
pub fn split_file(
    path: &Path,
    opts: SplitOptions,
    fs: &dyn Filesystem,
    rng: &mut dyn SecureRandom,
) -> Result<SplitResult, HorcruxError> {
    validate_options(&opts)?;

    let meta = fs.stat(path)?;
    if !meta.is_file {
        return Err(HorcruxError::NotAFile);
    }
    if meta.size == 0 {
        return Err(HorcruxError::EmptySecret);
    }

    let filename = basename(&path.to_string_lossy());
    let mut rng = AsRngCore(rng);
    let key = random_key(&mut rng);
    let shares = shamir::split(&key, opts.total, opts.threshold, &mut rng)?;
    let timestamp = now_ms();
    let headers = build_headers(&filename, timestamp, opts, shares);

    let reader = fs.create_read_stream(path)?;
    let bodies = stream::split_stream(reader, &key, opts)?;

    let original_size = meta.size;
    finish(headers, bodies, original_size)
}

fn split_buffer_with_rng<R: Rng>(
    data: &[u8],
    filename: &str,
    opts: SplitOptions,
    rng: &mut R,
) -> Result<SplitResult, HorcruxError> {
    validate_options(&opts)?;
    if data.is_empty() {
        return Err(HorcruxError::EmptySecret);
    }

    let key = random_key(rng);
    let shares = shamir::split(&key, opts.total, opts.threshold, rng)?;
    let timestamp = now_ms();
    let filename = basename(filename);
    let headers = build_headers(&filename, timestamp, opts, shares);

    let ciphertext = cipher::encrypt(data, &key)?;
    let bodies = if opts.threshold == opts.total {
        demux::demultiplex(&ciphertext, opts.total as usize)
    } else {
        vec![ciphertext.clone(); opts.total as usize]
    };

    finish(headers, bodies, data.len() as u64)
}

fn finish(
    headers: Vec<ShardHeader>,
    bodies: Vec<Vec<u8>>,
    original_size: u64,
) -> Result<SplitResult, HorcruxError> {
    let total_size: u64 = bodies.iter().map(|b| b.len() as u64).sum();
    let horcruxes: Vec<Shard> = headers
        .into_iter()
        .zip(bodies)
        .map(|(header, content)| Shard { header, content })
        .collect();

    tracing::info!(
        total = horcruxes.len(),
        original_size,
        total_size,
        "split complete"
    );

    Ok(SplitResult {
        horcruxes,
        original_size,
        total_size,
    })
}

fn build_headers(
    filename: &str,
    timestamp: u64,
    opts: SplitOptions,
    shares: Vec<shamir::Share>,
) -> Vec<ShardHeader> {
    shares
        .into_iter()
        .enumerate()
        .map(|(i, share)| ShardHeader {
            original_filename: filename.to_string(),
            timestamp,
            index: (i + 1) as u8,
            total: opts.total,
            threshold: opts.threshold,
            key_fragment: share.into(),
            version: CURRENT_VERSION,
        })
        .collect()
}

fn random_key<R: Rng>(rng: &mut R) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    rng.fill(&mut key);
    key
}

pub(super) fn validate_options(opts: &SplitOptions) -> Result<(), HorcruxError> {
    if !(2..=99).contains(&opts.total) {
        return Err(HorcruxError::InvalidTotal);
    }
    if !(2..=99).contains(&opts.threshold) {
        return Err(HorcruxError::InvalidThreshold);
    }
    if opts.threshold > opts.total {
        return Err(HorcruxError::ThresholdExceedsTotal {
            threshold: opts.threshold,
            total: opts.total,
        });
    }
    Ok(())
}

/// Strips both `/` and `\` path separators, keeping only the bare filename.
pub(super) fn basename(raw: &str) -> String {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw).to_string()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_millis() as u64
}
