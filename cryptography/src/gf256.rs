// SPDX-License-Identifier: Apache-2.0

//! Arithmetic over GF(2^8), the 256-element finite field used by AES.
//!
//! The field is defined by the reduction polynomial `x^8 + x^4 + x^3 + x + 1`
//! (0x11B). Addition and subtraction are XOR. Multiplication and division are
//! implemented with precomputed log/exp tables built around the generator 3,
//! following the standard AES approach: `mul(a, b) = exp[log[a] + log[b] mod 255]`.
//!
//! This module has no notion of secrets or shares; it is pure field
//! arithmetic, used by [`crate::shamir`] to evaluate and interpolate
//! polynomials byte by byte.

use thiserror::Error;

/// Errors that can occur doing GF(2^8) arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Gf256Error {
    /// Division by the additive identity (zero) is undefined in any field.
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
}

const TABLES: Gf256Tables = build_tables();

struct Gf256Tables {
    exp: [u8; 255],
    log: [u8; 256],
}

const fn build_tables() -> Gf256Tables {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];

    let mut x: u8 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x;
        log[x as usize] = i as u8;

        // Multiply x by the generator 3: 3*x = (2*x) xor x, and 2*x ("xtime")
        // is a left shift reduced by 0x1B whenever the high bit would carry
        // out of the byte.
        let xtime = if x & 0x80 != 0 {
            (x << 1) ^ 0x1B
        } else {
            x << 1
        };
        x = xtime ^ x;
        i += 1;
    }

    Gf256Tables { exp, log }
}

/// Addition in GF(2^8), i.e. XOR. Also its own inverse, so this doubles as
/// subtraction.
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplication in GF(2^8) via the log/exp tables.
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let sum = TABLES.log[a as usize] as u16 + TABLES.log[b as usize] as u16;
    TABLES.exp[(sum % 255) as usize]
}

/// Division in GF(2^8) via the log/exp tables.
///
/// Returns `0` when `a == 0` (consistent with `0/b == 0` for any nonzero
/// `b`), and fails with [`Gf256Error::DivisionByZero`] when `b == 0`.
pub fn div(a: u8, b: u8) -> Result<u8, Gf256Error> {
    if b == 0 {
        return Err(Gf256Error::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let diff = TABLES.log[a as usize] as i16 - TABLES.log[b as usize] as i16;
    let idx = diff.rem_euclid(255) as usize;
    Ok(TABLES.exp[idx])
}

/// Evaluates a polynomial at `x` using Horner's method.
///
/// `coeffs` is in degree order: `coeffs[0]` is the constant term,
/// `coeffs[coeffs.len() - 1]` is the leading term.
pub fn eval_poly(coeffs: &[u8], x: u8) -> u8 {
    let mut result = 0u8;
    for &c in coeffs.iter().rev() {
        result = add(mul(result, x), c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_xor_and_self_inverse() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(add(a, b), a ^ b);
            }
            assert_eq!(add(a, a), 0);
        }
    }

    #[test]
    fn mul_by_zero_is_zero() {
        for a in 0..=255u8 {
            assert_eq!(mul(a, 0), 0);
            assert_eq!(mul(0, a), 0);
        }
    }

    #[test]
    fn mul_by_one_is_identity() {
        for a in 0..=255u8 {
            assert_eq!(mul(a, 1), a);
            assert_eq!(mul(1, a), a);
        }
    }

    #[test]
    fn mul_is_commutative() {
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                assert_eq!(mul(a, b), mul(b, a));
            }
        }
    }

    #[test]
    fn div_undoes_mul() {
        for a in 1..=255u8 {
            for b in 1..=255u8 {
                let product = mul(a, b);
                assert_eq!(div(product, b).unwrap(), a);
            }
        }
    }

    #[test]
    fn div_by_zero_fails() {
        assert_eq!(div(5, 0), Err(Gf256Error::DivisionByZero));
    }

    #[test]
    fn div_of_zero_is_zero() {
        for b in 1..=255u8 {
            assert_eq!(div(0, b).unwrap(), 0);
        }
    }

    #[test]
    fn eval_poly_constant() {
        // A degree-0 polynomial should evaluate to its constant term everywhere.
        assert_eq!(eval_poly(&[42], 0), 42);
        assert_eq!(eval_poly(&[42], 200), 42);
    }

    #[test]
    fn eval_poly_at_zero_is_constant_term() {
        let coeffs = [7u8, 19, 201, 3];
        assert_eq!(eval_poly(&coeffs, 0), 7);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mul_div_are_inverses_for_any_nonzero_pair(a in 1u8..=255, b in 1u8..=255) {
            let product = mul(a, b);
            prop_assert_eq!(div(product, b).unwrap(), a);
        }

        #[test]
        fn add_is_its_own_inverse(a in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(add(add(a, b), b), a);
        }

        #[test]
        fn eval_poly_constant_term_survives_any_x(constant in any::<u8>(), x in any::<u8>()) {
            prop_assert_eq!(eval_poly(&[constant], x), constant);
        }
    }
}
