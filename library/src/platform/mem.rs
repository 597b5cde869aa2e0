//! An in-memory [`Filesystem`] fake, used by this crate's own tests so the
//! split/bind/discovery engines can be exercised without touching disk.

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use super::{FileMetadata, Filesystem};

#[derive(Debug, Default, Clone)]
pub(crate) struct MemFilesystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl MemFilesystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Filesystem for MemFilesystem {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn create_read_stream(&self, path: &Path) -> io::Result<Box<dyn io::Read>> {
        let data = self.read_file(path)?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn create_write_stream(&self, path: &Path) -> io::Result<Box<dyn io::Write>> {
        Ok(Box::new(MemWriter {
            path: path.to_path_buf(),
            buf: Vec::new(),
            files: self.files.clone(),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileMetadata> {
        let files = self.files.lock().unwrap();
        let data = files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))?;
        let now = SystemTime::now();
        Ok(FileMetadata {
            size: data.len() as u64,
            is_file: true,
            is_directory: false,
            modified_time: now,
            created_time: now,
        })
    }

    fn readdir(&self, path: &Path) -> io::Result<Vec<String>> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|p| {
                if p.parent() == Some(path) {
                    p.file_name()?.to_str().map(str::to_string)
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }

    fn unlink(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// A write stream that buffers writes and commits them to the fake
/// filesystem when dropped (mirroring a real file handle's close-on-drop).
struct MemWriter {
    path: PathBuf,
    buf: Vec<u8>,
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl io::Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemWriter {
    fn drop(&mut self) {
        self.files
            .lock()
            .unwrap()
            .insert(self.path.clone(), std::mem::take(&mut self.buf));
    }
}
