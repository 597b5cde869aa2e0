// SPDX-License-Identifier: Apache-2.0

//! # Shamir Secret Sharing over GF(2^8)
//!
//! This module provides an implementation of Shamir's Secret Sharing scheme
//! for byte-string secrets, evaluated over [`crate::gf256`]. The intended
//! purpose is to secret-share a symmetric key, which in turn protects a
//! larger payload via [`crate::cipher`].
//!
//! ## Overview
//!
//! Shamir's Secret Sharing allows a secret to be split into `n` shares such
//! that any `t` out of `n` shares can reconstruct the secret, but fewer than
//! `t` shares reveal nothing about the secret.
//!
//! ## Public Functions
//!
//! - [`split`] - Splits a secret into `n` shares with a reconstruction
//!   threshold of `t`.
//! - [`combine`] - Recovers the original secret from a set of shares via
//!   Lagrange interpolation at `x = 0`.
//!
//! ## Details
//!
//! Unlike a single-field-element scheme, the secret here may be any number
//! of bytes: each byte position gets its own independent random degree
//! `t-1` polynomial whose constant term is that byte, and a share's `y` is
//! the vector of per-byte evaluations at the share's `x`. `x = 0` is
//! reserved as the evaluation point for recovery and is never handed out as
//! a share coordinate.

use rand::Rng;
use thiserror::Error;

use crate::gf256;

/// Errors that can occur during Shamir secret sharing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShamirError {
    /// The secret to split was empty.
    #[error("secret must not be empty")]
    EmptySecret,
    /// `t` was not in `[2, 255]`, or `t > n`.
    #[error("threshold must be between 2 and the share count")]
    InvalidThreshold,
    /// `n` exceeded the 255 distinct nonzero x-coordinates available.
    #[error("cannot produce more than 255 shares")]
    TooManyShares,
    /// [`combine`] was called with no shares.
    #[error("at least one share is required to recover a secret")]
    EmptyShares,
    /// The shares being combined don't all carry the same secret length.
    #[error("all shares must have the same secret length")]
    LengthMismatch,
    /// Two shares collided on their `x` coordinate. Callers generating
    /// shares with distinct x-coordinates should never see this.
    #[error("two shares share an x-coordinate")]
    DivisionByZero,
}

impl From<gf256::Gf256Error> for ShamirError {
    fn from(_: gf256::Gf256Error) -> Self {
        ShamirError::DivisionByZero
    }
}

/// A single Shamir share: an `x` coordinate in `[1, 255]` and the vector of
/// per-byte polynomial evaluations `y` at that `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub x: u8,
    pub y: Vec<u8>,
}

/// Splits `secret` into `n` shares with reconstruction threshold `t`.
///
/// `x` coordinates are drawn without replacement from `[1, 255]` using
/// `rng`; `x = 0` is reserved for reconstruction and is never sampled.
pub fn split<R: Rng>(
    secret: &[u8],
    n: u8,
    t: u8,
    rng: &mut R,
) -> Result<Vec<Share>, ShamirError> {
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }
    if t < 2 || t > n {
        return Err(ShamirError::InvalidThreshold);
    }
    if n == 0 {
        return Err(ShamirError::TooManyShares);
    }

    let xs = distinct_nonzero_xs(n, rng)?;
    let mut ys: Vec<Vec<u8>> = vec![Vec::with_capacity(secret.len()); n as usize];

    for &byte in secret {
        // A degree t-1 polynomial has t coefficients; the constant term is
        // this secret byte, the rest are uniform random.
        let mut coeffs = vec![0u8; t as usize];
        coeffs[0] = byte;
        for c in coeffs.iter_mut().skip(1) {
            *c = rng.r#gen();
        }

        for (share_ys, &x) in ys.iter_mut().zip(xs.iter()) {
            share_ys.push(gf256::eval_poly(&coeffs, x));
        }
    }

    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Share { x, y })
        .collect())
}

/// Recovers the secret from a set of Shamir shares via Lagrange
/// interpolation at `x = 0`.
///
/// With fewer than the original threshold's worth of shares this still
/// returns a value — a deterministic but meaningless one — rather than an
/// error; the security of the scheme relies on that value being
/// indistinguishable from the true secret, not on this function detecting
/// the shortfall. It is the caller's duty to supply enough shares (see
/// `horcrux`'s bind engine, which enforces the threshold before calling
/// this).
pub fn combine(shares: &[Share]) -> Result<Vec<u8>, ShamirError> {
    if shares.is_empty() {
        return Err(ShamirError::EmptyShares);
    }

    let len = shares[0].y.len();
    if shares.iter().any(|s| s.y.len() != len) {
        return Err(ShamirError::LengthMismatch);
    }

    let xs: Vec<u8> = shares.iter().map(|s| s.x).collect();
    let weights = lagrange_weights_at_zero(&xs)?;

    let mut secret = vec![0u8; len];
    for (share, &weight) in shares.iter().zip(weights.iter()) {
        for (out, &y) in secret.iter_mut().zip(share.y.iter()) {
            *out = gf256::add(*out, gf256::mul(y, weight));
        }
    }

    Ok(secret)
}

/// Computes the Lagrange basis coefficients for interpolating at `x = 0`,
/// i.e. `L_j(0) = Π_{k≠j} (x_k / (x_j xor x_k))` for every share `j`.
fn lagrange_weights_at_zero(xs: &[u8]) -> Result<Vec<u8>, ShamirError> {
    let mut weights = Vec::with_capacity(xs.len());
    for (j, &x_j) in xs.iter().enumerate() {
        let mut weight = 1u8;
        for (k, &x_k) in xs.iter().enumerate() {
            if j != k {
                weight = gf256::mul(weight, gf256::div(x_k, gf256::add(x_j, x_k))?);
            }
        }
        weights.push(weight);
    }
    Ok(weights)
}

/// Draws `n` distinct nonzero byte values from `[1, 255]` without
/// replacement.
fn distinct_nonzero_xs<R: Rng>(n: u8, rng: &mut R) -> Result<Vec<u8>, ShamirError> {
    if n as usize > 255 {
        return Err(ShamirError::TooManyShares);
    }

    let mut seen = std::collections::HashSet::with_capacity(n as usize);
    while seen.len() < n as usize {
        let candidate: u8 = rng.r#gen();
        if candidate != 0 {
            seen.insert(candidate);
        }
    }

    let mut xs: Vec<u8> = seen.into_iter().collect();
    xs.sort_unstable();
    Ok(xs)
}
