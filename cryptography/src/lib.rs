// SPDX-License-Identifier: Apache-2.0

//! Low-level cryptographic primitives backing `horcrux`'s split/bind engine:
//! GF(2^8) field arithmetic, Shamir secret sharing of byte strings over that
//! field, an AES-256-OFB stream cipher with a fixed IV, and the round-robin
//! demultiplexer used by multiplexed-mode shards.
//!
//! This crate knows nothing about files, shard headers, or JSON — it only
//! operates on byte slices and keys. The `horcrux` crate builds the shard
//! container format and the split/bind orchestration on top of it.

pub mod cipher;
pub mod demux;
pub mod gf256;
pub mod shamir;

pub use cipher::{CipherError, CipherStream};
pub use demux::{demultiplex, multiplex, Demuxer, Muxer, QUOTA};
pub use gf256::Gf256Error;
pub use shamir::{Share, ShamirError};
