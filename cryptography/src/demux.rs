// SPDX-License-Identifier: Apache-2.0

//! Round-robin byte demultiplexer/multiplexer used for multiplexed-mode
//! shards (`threshold == total`).
//!
//! Bytes are dispatched to `n` sinks in fixed 100-byte stripes: sink 0 gets
//! bytes `[0, 100)`, `[100*n, 100*n+100)`, ...; sink `k` gets
//! `[100*k, 100*(k+1))`, `[100*(n+k), 100*(n+k+1))`, and so on. The final
//! stripe of the whole input may be shorter than `QUOTA` if the input length
//! isn't a multiple of `QUOTA * n`.
//!
//! [`Demuxer`] and [`Muxer`] expose this as an incremental state machine —
//! an `(i, c)` counter pair tracking the current sink and position within
//! its stripe — for the streaming file-based split path, which never holds
//! the whole ciphertext in memory. [`demultiplex`] and [`multiplex`] are
//! whole-buffer conveniences built on top of them for the in-memory path.

/// Fixed stripe size, in bytes, per round-robin turn.
pub const QUOTA: usize = 100;

/// Splits `data` across `n` sinks in round-robin 100-byte stripes.
pub fn demultiplex(data: &[u8], n: usize) -> Vec<Vec<u8>> {
    let mut sinks = vec![Vec::new(); n];
    let mut demuxer = Demuxer::new(n);
    for &byte in data {
        demuxer.push(byte, &mut sinks);
    }
    sinks
}

/// Reassembles the original byte stream from `n` sinks produced by
/// [`demultiplex`], reading up to `QUOTA` bytes from each sink in turn and
/// skipping sinks that have been exhausted.
pub fn multiplex(sinks: &[Vec<u8>]) -> Vec<u8> {
    let total_len: usize = sinks.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(total_len);
    let mut offsets = vec![0usize; sinks.len()];

    let mut remaining = total_len;
    let mut i = 0usize;
    while remaining > 0 {
        if offsets[i] < sinks[i].len() {
            let take = QUOTA.min(sinks[i].len() - offsets[i]);
            out.extend_from_slice(&sinks[i][offsets[i]..offsets[i] + take]);
            offsets[i] += take;
            remaining -= take;
        }
        i = (i + 1) % sinks.len();
    }

    out
}

/// Incremental round-robin demultiplexer state: a sink index `i` and a
/// byte counter `c` within the current sink's stripe.
pub struct Demuxer {
    n: usize,
    i: usize,
    c: usize,
}

impl Demuxer {
    /// Starts a new demultiplexer over `n` sinks, in state `(i=0, c=0)`.
    pub fn new(n: usize) -> Self {
        Demuxer { n, i: 0, c: 0 }
    }

    /// Routes a single byte to the current sink and advances the state.
    pub fn push(&mut self, byte: u8, sinks: &mut [Vec<u8>]) {
        sinks[self.i].push(byte);
        self.c += 1;
        if self.c == QUOTA {
            self.c = 0;
            self.i = (self.i + 1) % self.n;
        }
    }

    /// Routes a chunk of bytes, preserving state across calls.
    pub fn push_chunk(&mut self, chunk: &[u8], sinks: &mut [Vec<u8>]) {
        for &byte in chunk {
            self.push(byte, sinks);
        }
    }
}

/// Incremental round-robin multiplexer: the inverse of [`Demuxer`], reading
/// up to `QUOTA` bytes per turn from whichever sink is live.
pub struct Muxer<'a> {
    sinks: &'a [Vec<u8>],
    offsets: Vec<usize>,
    i: usize,
}

impl<'a> Muxer<'a> {
    /// Starts a new multiplexer over `sinks`.
    pub fn new(sinks: &'a [Vec<u8>]) -> Self {
        let offsets = vec![0usize; sinks.len()];
        Muxer { sinks, offsets, i: 0 }
    }

    /// Pulls up to `QUOTA` bytes from the next live sink, or `None` once
    /// every sink is exhausted.
    pub fn next_stripe(&mut self) -> Option<Vec<u8>> {
        if self.sinks.is_empty() {
            return None;
        }

        for _ in 0..self.sinks.len() {
            let i = self.i;
            self.i = (self.i + 1) % self.sinks.len();

            let sink = &self.sinks[i];
            if self.offsets[i] < sink.len() {
                let take = QUOTA.min(sink.len() - self.offsets[i]);
                let stripe = sink[self.offsets[i]..self.offsets[i] + take].to_vec();
                self.offsets[i] += take;
                return Some(stripe);
            }
        }

        None
    }
}
