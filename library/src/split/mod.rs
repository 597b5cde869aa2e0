pub mod split;
mod stream;

pub use split::{split_buffer, split_file};
