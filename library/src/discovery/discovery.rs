//! Auto-discovery: given a directory, find the one set of shards it holds
//! and bind them without the caller having to name files explicitly.

use std::collections::HashMap;
use std::path::Path;

use crate::bind::bind_horcruxes;
use crate::container;
use crate::error::HorcruxError;
use crate::platform::Filesystem;
use crate::types::{BindOptions, BindResult, Shard};

/// Scans `dir` for `.horcrux` files, groups whatever parses by
/// `(originalFilename, timestamp)`, and binds the single resulting group.
///
/// Entries that fail to read or parse are skipped, not fatal — a stray
/// non-shard file in the directory shouldn't block reconstruction.
/// [`HorcruxError::NoShards`] if nothing parses, or
/// [`HorcruxError::AmbiguousShardSets`] if more than one split run is
/// present and the caller needs to disambiguate manually.
pub fn auto_bind(dir: &Path, fs: &dyn Filesystem) -> Result<BindResult, HorcruxError> {
    let entries = fs.readdir(dir)?;
    let mut groups: HashMap<(String, u64), Vec<Shard>> = HashMap::new();

    for name in entries {
        if !name.ends_with(".horcrux") {
            continue;
        }
        let path = dir.join(&name);

        let bytes = match fs.read_file(&path) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(file = %name, %error, "could not read candidate shard, skipping");
                continue;
            }
        };

        match container::parse(&bytes) {
            Ok(shard) => {
                let key = (shard.header.original_filename.clone(), shard.header.timestamp);
                groups.entry(key).or_default().push(shard);
            }
            Err(error) => {
                tracing::warn!(file = %name, %error, "could not parse candidate shard, skipping");
            }
        }
    }

    if groups.is_empty() {
        return Err(HorcruxError::NoShards);
    }
    if groups.len() > 1 {
        let mut filenames: Vec<String> = groups.keys().map(|(filename, _)| filename.clone()).collect();
        filenames.sort();
        return Err(HorcruxError::AmbiguousShardSets(filenames));
    }

    let (_, shards) = groups.into_iter().next().expect("checked non-empty above");
    bind_horcruxes(&shards, &BindOptions::default())
}
