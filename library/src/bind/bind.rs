//! The bind engine and the common shard-set validation rules.

use std::collections::HashSet;
use std::path::Path;

use horcrux_cryptography::{cipher, demux, shamir};

use crate::container;
use crate::error::HorcruxError;
use crate::platform::Filesystem;
use crate::types::{BindOptions, BindResult, Shard};

/// Reconstructs the original plaintext from `shards` (already loaded into
/// memory), per the options in `opts`.
pub fn bind_horcruxes(shards: &[Shard], opts: &BindOptions) -> Result<BindResult, HorcruxError> {
    if shards.is_empty() {
        return Err(HorcruxError::NoShards);
    }
    validate_set(shards)?;

    let header0 = &shards[0].header;
    let threshold = header0.threshold as usize;
    if shards.len() < threshold {
        return Err(HorcruxError::InsufficientShards {
            have: shards.len(),
            need: threshold,
        });
    }

    let selected = &shards[..threshold];
    let fragments: Vec<shamir::Share> = selected
        .iter()
        .map(|s| s.header.key_fragment.clone().into())
        .collect();
    let key = shamir::combine(&fragments)?;

    let ciphertext = if header0.total == header0.threshold {
        // Multiplexed mode: each shard's content is one round-robin sink
        // from the split-time demultiplexer, so reassembly must read QUOTA
        // bytes per sink in turn (demux::multiplex), not just concatenate
        // whole bodies — those only coincide when every sink holds a single
        // stripe.
        let mut sorted: Vec<&Shard> = selected.iter().collect();
        sorted.sort_by_key(|s| s.header.index);
        let bodies: Vec<Vec<u8>> = sorted.into_iter().map(|s| s.content.clone()).collect();
        demux::multiplex(&bodies)
    } else {
        selected[0].content.clone()
    };

    let plaintext = cipher::decrypt(&ciphertext, &key)?;
    let filename = opts
        .output_filename
        .clone()
        .unwrap_or_else(|| header0.original_filename.clone());
    let horcruxes_used = threshold as u8;

    tracing::info!(horcruxes_used, "bind complete");

    Ok(BindResult {
        data: plaintext,
        filename,
        horcruxes_used,
    })
}

/// Reads each of `paths` via `fs`, binds them, and writes the result to
/// `out_path`.
pub fn bind_files(
    paths: &[&Path],
    out_path: &Path,
    opts: &BindOptions,
    fs: &dyn Filesystem,
) -> Result<BindResult, HorcruxError> {
    let shards: Vec<Shard> = paths
        .iter()
        .map(|p| {
            let bytes = fs.read_file(p)?;
            container::parse(&bytes)
        })
        .collect::<Result<_, HorcruxError>>()?;

    let result = bind_horcruxes(&shards, opts)?;
    fs.write_file(out_path, &result.data)?;
    Ok(result)
}

/// Validates that every shard in `shards` agrees with the first on
/// `(originalFilename, timestamp, total, threshold)` and that no two share
/// an `index` — the common rules used by both [`bind_horcruxes`] and
/// auto-discovery's per-group sanity check.
pub(crate) fn validate_set(shards: &[Shard]) -> Result<(), HorcruxError> {
    let first = &shards[0].header;
    let mut seen_indexes = HashSet::with_capacity(shards.len());

    for shard in shards {
        let header = &shard.header;
        if header.original_filename != first.original_filename {
            return Err(HorcruxError::DifferentFiles);
        }
        if header.timestamp != first.timestamp {
            return Err(HorcruxError::DifferentSplitRuns);
        }
        if header.total != first.total {
            return Err(HorcruxError::InconsistentTotal);
        }
        if header.threshold != first.threshold {
            return Err(HorcruxError::InconsistentThreshold);
        }
        if !seen_indexes.insert(header.index) {
            return Err(HorcruxError::DuplicateIndex(header.index));
        }
    }

    Ok(())
}
