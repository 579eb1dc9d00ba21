//! Exact fixed-point arithmetic on host integers.
//!
//! Rates, thresholds and allocations are smallest-unit integers. Products of
//! two such values can exceed 128 bits, so they are formed as `U256` host
//! values and divided once. Quotients round toward zero; the remainder is
//! returned so callers can report truncation.

use soroban_sdk::{Env, U256};

/// Result of `floor(a * b / d)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MulDiv {
    pub quotient: u128,
    pub remainder: u128,
}

impl MulDiv {
    /// True when the division discarded a non-zero remainder.
    pub fn is_truncated(&self) -> bool {
        self.remainder != 0
    }
}

/// Compute `a * b / d` with a 256-bit intermediate product.
///
/// Returns `None` when `d == 0` or when the quotient does not fit in `u128`.
/// Both operands are below 2^128, so the product always fits in 256 bits.
pub fn mul_div_floor(env: &Env, a: u128, b: u128, d: u128) -> Option<MulDiv> {
    if d == 0 {
        return None;
    }
    if a == 0 || b == 0 {
        return Some(MulDiv {
            quotient: 0,
            remainder: 0,
        });
    }
    if let Some(product) = a.checked_mul(b) {
        return Some(MulDiv {
            quotient: product / d,
            remainder: product % d,
        });
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let divisor = U256::from_u128(env, d);
    let quotient = product.div(&divisor).to_u128()?;
    let remainder = product.rem_euclid(&divisor).to_u128()?;
    Some(MulDiv {
        quotient,
        remainder,
    })
}

/// `10^exp`, or `None` when it does not fit in `u128` (exp > 38).
pub fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Convert a non-negative `i128` into `u128`.
pub fn non_negative(value: i128) -> Option<u128> {
    u128::try_from(value).ok()
}
