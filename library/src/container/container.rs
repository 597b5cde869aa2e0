//! The shard container format: a UTF-8 text header (an optional comment, a
//! marker line, and a JSON-encoded [`ShardHeader`]) followed by a marker
//! line and the raw binary body.
//!
//! ```text
//! <optional human-readable comment line, UTF-8>\n
//! !HORCRUX-BEGIN-HEADER!\n
//! <header JSON, UTF-8, no trailing newline required>\n
//! !HORCRUX-BEGIN-BODY!\n
//! <raw ciphertext body bytes>
//! ```
//!
//! [`serialize`] and [`parse`] are exact inverses for any valid shard:
//! `parse(serialize(shard, None)) == shard` byte-for-byte. Parsing never
//! assumes the body is valid UTF-8 — only the header JSON slice is
//! interpreted as text.

use std::path::{Path, PathBuf};

use crate::error::HorcruxError;
use crate::platform::Filesystem;
use crate::types::{Shard, ShardHeader, CURRENT_VERSION};

pub const HEADER_MARKER: &str = "!HORCRUX-BEGIN-HEADER!";
pub const BODY_MARKER: &str = "!HORCRUX-BEGIN-BODY!";

/// Serializes `shard` with no leading comment line.
pub fn serialize(shard: &Shard) -> Vec<u8> {
    serialize_with_comment(shard, None)
}

/// Serializes `shard`, optionally prefixed with a human-readable comment
/// line (e.g. "this file is one of N horcruxes; see <url> to reconstruct").
pub fn serialize_with_comment(shard: &Shard, comment: Option<&str>) -> Vec<u8> {
    let header_json =
        serde_json::to_vec(&shard.header).expect("ShardHeader serialization cannot fail");

    let mut out = Vec::with_capacity(
        header_json.len() + shard.content.len() + HEADER_MARKER.len() + BODY_MARKER.len() + 16,
    );

    if let Some(comment) = comment {
        out.extend_from_slice(comment.as_bytes());
        out.push(b'\n');
    }

    out.extend_from_slice(HEADER_MARKER.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&header_json);
    out.push(b'\n');
    out.extend_from_slice(BODY_MARKER.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&shard.content);

    out
}

/// Parses a shard out of its container bytes.
pub fn parse(bytes: &[u8]) -> Result<Shard, HorcruxError> {
    let header_marker_pos =
        find_subslice(bytes, HEADER_MARKER.as_bytes()).ok_or(HorcruxError::MissingHeaderMarker)?;

    let header_json_start = header_marker_pos + HEADER_MARKER.len() + 1;
    if header_json_start > bytes.len() {
        return Err(HorcruxError::MissingBodyMarker);
    }

    let body_marker_rel = find_subslice(&bytes[header_json_start..], BODY_MARKER.as_bytes())
        .ok_or(HorcruxError::MissingBodyMarker)?;
    let body_marker_pos = header_json_start + body_marker_rel;

    // The header JSON ends right before the `\n` that precedes the body
    // marker.
    let header_json_end = if body_marker_pos > header_json_start
        && bytes[body_marker_pos - 1] == b'\n'
    {
        body_marker_pos - 1
    } else {
        body_marker_pos
    };

    let header_json = &bytes[header_json_start..header_json_end];
    let header: ShardHeader = serde_json::from_slice(header_json)
        .map_err(|e| HorcruxError::MalformedHeader(e.to_string()))?;

    if header.version != CURRENT_VERSION {
        return Err(HorcruxError::UnsupportedVersion(header.version));
    }

    let body_start = body_marker_pos + BODY_MARKER.len() + 1;
    let content = if body_start <= bytes.len() {
        bytes[body_start..].to_vec()
    } else {
        Vec::new()
    };

    Ok(Shard { header, content })
}

/// The conventional on-disk filename for a persisted shard:
/// `<originalFilename>.<index>_<total>.horcrux`.
pub fn shard_filename(header: &ShardHeader) -> String {
    format!(
        "{}.{}_{}.horcrux",
        header.original_filename, header.index, header.total
    )
}

/// Serializes each of `shards` and writes it under `output_dir` using
/// [`shard_filename`], via `fs`. Returns the paths written, in the same
/// order as `shards`.
pub fn save_shards(
    shards: &[Shard],
    output_dir: &Path,
    fs: &dyn Filesystem,
) -> Result<Vec<PathBuf>, HorcruxError> {
    shards
        .iter()
        .map(|shard| {
            let path = output_dir.join(shard_filename(&shard.header));
            fs.write_file(&path, &serialize(shard))?;
            Ok(path)
        })
        .collect()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
