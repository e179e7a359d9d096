//! Modular arithmetic over prime fields.
//!
//! All curve math in this crate runs on [`num_bigint::BigUint`] values
//! reduced into `[0, m)`. Intermediates may grow to 512 bits; `BigUint`
//! absorbs that without fixed-width juggling.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// `(a + b) mod m`.
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, wrapping into `[0, m)`.
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a % m) + m - (b % m)) % m
}

/// `(a * b) mod m`.
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `base^exp mod m` by square-and-multiply.
pub fn pow_mod(base: &BigUint, exp: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exp, m)
}

/// Modular inverse of `a` modulo `m` via the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1` (including `a == 0`).
pub fn invert(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }
    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());

    let (mut old_r, mut r) = (a, m_int.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    if !old_r.is_one() {
        return None;
    }
    // old_s may be negative; lift into [0, m).
    let lifted = ((old_s % &m_int) + &m_int) % &m_int;
    lifted.to_biguint()
}

/// Modular square root for primes `p ≡ 3 (mod 4)`: `a^((p+1)/4) mod p`.
///
/// Returns `None` when `a` is a non-residue (the candidate does not square
/// back to `a`).
pub fn sqrt_mod(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let exp = (p + 1u32) >> 2u32;
    let root = a.modpow(&exp, p);
    if mul_mod(&root, &root, p) == a % p {
        Some(root)
    } else {
        None
    }
}
