//! Ed25519 public-key derivation in twisted Edwards form.
//!
//! Two wallet families derive keys on this curve with the same clamped
//! scalar construction but different 64-byte seed expansions:
//!
//! | Variant | Expansion | Used by |
//! |---------|-----------|---------|
//! | [`derive_pubkey_sha512`] | SHA-512(seed) | Nimiq (RFC 8032) |
//! | [`derive_pubkey_blake2b`] | Blake2b-512(seed) | Nano |
//!
//! The curve core is shared; only the hash differs. Point math is affine
//! with the complete twisted-Edwards addition law, finishing each step with
//! a modular inverse.

use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::Error;
use crate::field;
use crate::hashes;

/// Field prime `p = 2^255 - 19`.
static P: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::parse_bytes(
        b"7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
        16,
    )
    .expect("curve constant")
});

/// Edwards constant `d = -121665/121666 mod p`.
static D: LazyLock<BigUint> = LazyLock::new(|| {
    let inv = field::invert(&BigUint::from(121666u32), &P).expect("121666 invertible mod p");
    let neg = field::sub_mod(&BigUint::zero(), &BigUint::from(121665u32), &P);
    field::mul_mod(&neg, &inv, &P)
});

/// Base point B with `y = 4/5` and even x.
static B: LazyLock<(BigUint, BigUint)> = LazyLock::new(|| {
    (
        BigUint::parse_bytes(
            b"216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
            16,
        )
        .expect("curve constant"),
        BigUint::parse_bytes(
            b"6666666666666666666666666666666666666666666666666666666666666658",
            16,
        )
        .expect("curve constant"),
    )
});

type Coords = (BigUint, BigUint);

/// Complete addition on `-x^2 + y^2 = 1 + d x^2 y^2`; also handles doubling
/// and the neutral element `(0, 1)`.
fn point_add(p: &Coords, q: &Coords) -> Coords {
    let (x1, y1) = p;
    let (x2, y2) = q;
    let x1x2 = field::mul_mod(x1, x2, &P);
    let y1y2 = field::mul_mod(y1, y2, &P);
    let x1y2 = field::mul_mod(x1, y2, &P);
    let y1x2 = field::mul_mod(y1, x2, &P);
    let t = field::mul_mod(&D, &field::mul_mod(&x1x2, &y1y2, &P), &P);
    let one = BigUint::one();
    let x_den = field::invert(&field::add_mod(&one, &t, &P), &P)
        .expect("denominator non-zero on the complete addition law");
    let y_den = field::invert(&field::sub_mod(&one, &t, &P), &P)
        .expect("denominator non-zero on the complete addition law");
    let x3 = field::mul_mod(&field::add_mod(&x1y2, &y1x2, &P), &x_den, &P);
    let y3 = field::mul_mod(&field::add_mod(&y1y2, &x1x2, &P), &y_den, &P);
    (x3, y3)
}

/// Double-and-add over the scalar bits, LSB to MSB.
fn scalar_mul_base(k: &BigUint) -> Coords {
    let mut acc: Coords = (BigUint::zero(), BigUint::one());
    let mut addend = B.clone();
    let bits = k.bits();
    for i in 0..bits {
        if k.bit(i) {
            acc = point_add(&acc, &addend);
        }
        if i + 1 < bits {
            addend = point_add(&addend, &addend);
        }
    }
    acc
}

/// Encode an affine point: 32 little-endian bytes of y, x parity in bit 7
/// of the final byte.
fn encode_point(point: &Coords) -> [u8; 32] {
    let (x, y) = point;
    let bytes = y.to_bytes_le();
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(&bytes);
    if x.bit(0) {
        out[31] |= 0x80;
    }
    out
}

/// Clamp the low 32 bytes of a 64-byte expansion and interpret the result
/// as a little-endian scalar.
fn clamped_scalar(expansion: &[u8; 64]) -> BigUint {
    let mut raw = [0u8; 32];
    raw.copy_from_slice(&expansion[..32]);
    raw[0] &= 0xf8;
    raw[31] &= 0x7f;
    raw[31] |= 0x40;
    BigUint::from_bytes_le(&raw)
}

fn derive(expansion: &[u8; 64]) -> [u8; 32] {
    let scalar = clamped_scalar(expansion);
    encode_point(&scalar_mul_base(&scalar))
}

/// RFC 8032 public-key derivation: SHA-512 expansion, clamp, multiply.
pub fn derive_pubkey_sha512(seed: &[u8]) -> Result<[u8; 32], Error> {
    if seed.len() != 32 {
        return Err(Error::InvalidLength);
    }
    Ok(derive(&hashes::sha512(seed)))
}

/// Nano-style derivation: identical to [`derive_pubkey_sha512`] with
/// Blake2b-512 as the seed expansion.
pub fn derive_pubkey_blake2b(seed: &[u8]) -> Result<[u8; 32], Error> {
    if seed.len() != 32 {
        return Err(Error::InvalidLength);
    }
    Ok(derive(&hashes::blake2b_512(seed)))
}
