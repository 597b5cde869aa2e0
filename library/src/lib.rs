//! horcrux: split a file into `N` encrypted shards, any `K` of which
//! reconstruct it, via Shamir's Secret Sharing over GF(2^8) and AES-256-OFB.
//!
//! The engine itself ([`split`], [`bind`]) is pure given a [`platform::Filesystem`]
//! and [`platform::SecureRandom`] — production code wires up [`platform::StdFilesystem`]
//! and [`platform::OsRandom`]; tests wire up an in-memory fake instead.

pub mod bind;
pub mod container;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod split;
pub mod types;

use std::path::{Path, PathBuf};

pub use error::HorcruxError;
pub use types::{BindOptions, BindResult, KeyFragment, Shard, ShardHeader, SplitOptions, SplitResult};

use platform::{Filesystem, OsRandom, StdFilesystem};

/// Splits the file at `input_path` into `total` shards, `threshold` of
/// which reconstruct it, and writes them alongside it as
/// `<name>.<index>_<total>.horcrux`. Convenience wrapper over
/// [`split::split_file`] and [`container::save_shards`] using the real
/// filesystem and the OS CSPRNG.
pub fn split(input_path: &Path, total: u8, threshold: u8) -> Result<Vec<PathBuf>, HorcruxError> {
    let fs = StdFilesystem;
    let mut rng = OsRandom;
    let opts = SplitOptions { total, threshold };
    let result = split::split_file(input_path, opts, &fs, &mut rng)?;
    let output_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    container::save_shards(&result.horcruxes, output_dir, &fs)
}

/// Reads and parses each of `paths` as a shard, reconstructs the original
/// file, and writes it to `output_path`. Convenience wrapper over
/// [`bind::bind_files`] using the real filesystem.
pub fn bind(paths: &[&Path], output_path: &Path) -> Result<BindResult, HorcruxError> {
    let fs = StdFilesystem;
    bind::bind_files(paths, output_path, &BindOptions::default(), &fs)
}

/// Scans `dir` for the one set of `.horcrux` shards it holds and
/// reconstructs it, writing the result to `output_path`. Convenience
/// wrapper over [`discovery::auto_bind`] using the real filesystem.
pub fn auto_bind(dir: &Path, output_path: &Path) -> Result<BindResult, HorcruxError> {
    let fs = StdFilesystem;
    let result = discovery::auto_bind(dir, &fs)?;
    fs.write_file(output_path, &result.data)?;
    Ok(result)
}
