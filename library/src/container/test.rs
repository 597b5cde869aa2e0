use super::*;
use crate::error::HorcruxError;
use crate::platform::mem::MemFilesystem;
use crate::platform::Filesystem;
use crate::types::{KeyFragment, Shard, ShardHeader, CURRENT_VERSION};

fn sample_shard() -> Shard {
    Shard {
        header: ShardHeader {
            original_filename: "secret.pdf".to_string(),
            timestamp: 1_700_000_000_000,
            index: 3,
            total: 5,
            threshold: 3,
            key_fragment: KeyFragment {
                x: 42,
                y: vec![1, 2, 3, 4, 5],
            },
            version: CURRENT_VERSION,
        },
        content: vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0xFF],
    }
}

#[test]
fn round_trips_byte_for_byte() {
    let shard = sample_shard();
    let bytes = serialize(&shard);
    let parsed = parse(&bytes).unwrap();
    assert_eq!(parsed, shard);
}

#[test]
fn round_trips_with_a_leading_comment() {
    let shard = sample_shard();
    let bytes = serialize_with_comment(&shard, Some("this is 1 of 5 horcruxes"));
    let parsed = parse(&bytes).unwrap();
    assert_eq!(parsed, shard);
}

#[test]
fn round_trips_binary_body_with_all_byte_values() {
    let mut shard = sample_shard();
    shard.content = (0..=255u8).collect();
    let bytes = serialize(&shard);
    let parsed = parse(&bytes).unwrap();
    assert_eq!(parsed, shard);
}

#[test]
fn layout_matches_the_specified_markers() {
    let shard = sample_shard();
    let bytes = serialize(&shard);
    let text_prefix_len = bytes.len() - shard.content.len();
    let text = std::str::from_utf8(&bytes[..text_prefix_len]).unwrap();

    assert!(text.starts_with(HEADER_MARKER));
    assert!(text.contains(BODY_MARKER));
    assert!(bytes.ends_with(&shard.content));
}

#[test]
fn missing_header_marker_is_rejected() {
    let bytes = b"no markers here at all".to_vec();
    assert!(matches!(
        parse(&bytes),
        Err(HorcruxError::MissingHeaderMarker)
    ));
}

#[test]
fn missing_body_marker_is_rejected() {
    let mut bytes = HEADER_MARKER.as_bytes().to_vec();
    bytes.push(b'\n');
    bytes.extend_from_slice(b"{}");
    assert!(matches!(
        parse(&bytes),
        Err(HorcruxError::MissingBodyMarker)
    ));
}

#[test]
fn malformed_json_header_is_rejected() {
    let mut bytes = HEADER_MARKER.as_bytes().to_vec();
    bytes.push(b'\n');
    bytes.extend_from_slice(b"not json\n");
    bytes.extend_from_slice(BODY_MARKER.as_bytes());
    bytes.push(b'\n');
    assert!(matches!(
        parse(&bytes),
        Err(HorcruxError::MalformedHeader(_))
    ));
}

#[test]
fn unsupported_version_is_rejected() {
    let mut shard = sample_shard();
    shard.header.version = CURRENT_VERSION + 1;
    let bytes = serialize(&shard);
    assert!(matches!(
        parse(&bytes),
        Err(HorcruxError::UnsupportedVersion(v)) if v == CURRENT_VERSION + 1
    ));
}

#[test]
fn shard_filename_follows_the_convention() {
    let shard = sample_shard();
    assert_eq!(shard_filename(&shard.header), "secret.pdf.3_5.horcrux");
}

#[test]
fn save_shards_writes_one_file_per_shard_under_the_convention_name() {
    let fs = MemFilesystem::new();
    let a = sample_shard();
    let mut b = sample_shard();
    b.header.index = 4;

    let paths = save_shards(&[a.clone(), b.clone()], std::path::Path::new("/out"), &fs).unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0], std::path::Path::new("/out/secret.pdf.3_5.horcrux"));
    assert_eq!(paths[1], std::path::Path::new("/out/secret.pdf.4_5.horcrux"));
    assert_eq!(parse(&fs.read_file(&paths[0]).unwrap()).unwrap(), a);
    assert_eq!(parse(&fs.read_file(&paths[1]).unwrap()).unwrap(), b);
}

#[test]
fn empty_body_round_trips() {
    let mut shard = sample_shard();
    shard.content.clear();
    let bytes = serialize(&shard);
    assert_eq!(parse(&bytes).unwrap(), shard);
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Invariant 4: parse(serialize(s)) == s byte-for-byte, for any
        // well-formed shard.
        #[test]
        fn serialize_then_parse_round_trips_for_any_shard(
            original_filename in "[a-zA-Z0-9._ -]{1,40}",
            timestamp in any::<u64>(),
            index in 1u8..=99,
            total in 1u8..=99,
            threshold in 1u8..=99,
            x in 1u8..=255,
            y in prop::collection::vec(any::<u8>(), 1..64),
            content in prop::collection::vec(any::<u8>(), 0..512),
        ) {
            let shard = Shard {
                header: ShardHeader {
                    original_filename,
                    timestamp,
                    index,
                    total,
                    threshold,
                    key_fragment: KeyFragment { x, y },
                    version: CURRENT_VERSION,
                },
                content,
            };

            let bytes = serialize(&shard);
            prop_assert_eq!(parse(&bytes).unwrap(), shard);
        }
    }
}
