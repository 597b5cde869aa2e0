//! The streaming encrypt/demultiplex pipeline used by [`super::split::split_file`].
//!
//! Plaintext is read from the source in fixed-size chunks, encrypted in
//! place, and immediately routed to the relevant shard body buffer(s) —
//! the full plaintext and the full ciphertext are never both resident at
//! once, only the chunk currently in flight plus the growing shard bodies
//! (which together never exceed the ciphertext's total size in replicated
//! mode, and exactly equal it in multiplexed mode).

use std::io::Read;

use horcrux_cryptography::cipher::CipherStream;
use horcrux_cryptography::demux::Demuxer;

use crate::error::HorcruxError;
use crate::types::SplitOptions;

const CHUNK_SIZE: usize = 64 * 1024;

/// Encrypts everything read from `reader` under `key` and distributes it
/// across `opts.total` shard bodies, per `opts.threshold`'s mode.
pub(super) fn split_stream(
    mut reader: Box<dyn Read>,
    key: &[u8],
    opts: SplitOptions,
) -> Result<Vec<Vec<u8>>, HorcruxError> {
    let mut cipher = CipherStream::new(key)?;
    let n = opts.total as usize;
    let mut buf = vec![0u8; CHUNK_SIZE];

    if opts.threshold == opts.total {
        let mut sinks = vec![Vec::new(); n];
        let mut demuxer = Demuxer::new(n);
        loop {
            let read = reader.read(&mut buf)?;
            if read == 0 {
                break;
            }
            let chunk = &mut buf[..read];
            cipher.apply(chunk);
            demuxer.push_chunk(chunk, &mut sinks);
        }
        Ok(sinks)
    } else {
        let mut ciphertext = Vec::new();
        loop {
            let read = reader.read(&mut buf)?;
            if read == 0 {
                break;
            }
            let chunk = &mut buf[..read];
            cipher.apply(chunk);
            ciphertext.extend_from_slice(chunk);
        }
        Ok(vec![ciphertext; n])
    }
}
