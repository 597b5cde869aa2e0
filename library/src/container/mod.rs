pub mod container;

pub use container::{
    parse, save_shards, serialize, serialize_with_comment, shard_filename, BODY_MARKER,
    HEADER_MARKER,
};

#[cfg(test)]
mod test;
