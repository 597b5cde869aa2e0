//! The platform boundary: the filesystem and CSPRNG capabilities the split
//! and bind engines consume, but never implement themselves.
//!
//! Everything in `horcrux` above this module is pure: given the same
//! bytes, options, and randomness, it produces the same shards. This
//! module is where the engine actually touches the outside world, and it
//! does so only through the two traits below, so the engine can be
//! exercised against an in-memory fake in tests without touching disk.

mod std_impl;

#[cfg(test)]
pub(crate) mod mem;

use std::io;
use std::path::Path;
use std::time::SystemTime;

pub use std_impl::{OsRandom, StdFilesystem};

/// Metadata about a filesystem entry, as returned by [`Filesystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub is_file: bool,
    pub is_directory: bool,
    pub modified_time: SystemTime,
    pub created_time: SystemTime,
}

/// Abstract read/write/stat/list/delete access to byte streams at named
/// paths. Paths are opaque to the engine; only the host interprets them.
pub trait Filesystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    fn create_read_stream(&self, path: &Path) -> io::Result<Box<dyn io::Read>>;
    fn create_write_stream(&self, path: &Path) -> io::Result<Box<dyn io::Write>>;
    fn exists(&self, path: &Path) -> bool;
    fn stat(&self, path: &Path) -> io::Result<FileMetadata>;
    fn readdir(&self, path: &Path) -> io::Result<Vec<String>>;
    fn unlink(&self, path: &Path) -> io::Result<()>;
}

/// A cryptographically secure random byte source.
pub trait SecureRandom {
    fn fill(&mut self, buf: &mut [u8]);
}

/// Bridges a [`SecureRandom`] trait object to `rand`'s [`rand::RngCore`], so
/// the split engine can hand the platform's CSPRNG to code that is generic
/// over `rand::Rng` (Shamir's share generation) without depending on any
/// particular `rand` backend itself.
pub(crate) struct AsRngCore<'a>(pub &'a mut dyn SecureRandom);

impl rand::RngCore for AsRngCore<'_> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.0.fill(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.0.fill(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.fill(dest);
        Ok(())
    }
}
