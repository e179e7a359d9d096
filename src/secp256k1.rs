//! secp256k1 public-key derivation.
//!
//! A minimal engine for the one operation wallets need from this curve:
//! scalar multiplication of the base point, plus SEC1 compression and
//! decompression. Arithmetic is affine over [`crate::field`]; each addition
//! finishes with one modular inverse, which is plenty fast for key
//! derivation and keeps the formulas auditable.

use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Error;
use crate::field;

/// Field prime `p = 2^256 - 2^32 - 977`.
static P: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        16,
    )
    .expect("curve constant")
});

/// Group order `n`.
static N: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        16,
    )
    .expect("curve constant")
});

/// Base point G.
static G: LazyLock<(BigUint, BigUint)> = LazyLock::new(|| {
    (
        BigUint::parse_bytes(
            b"79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            16,
        )
        .expect("curve constant"),
        BigUint::parse_bytes(
            b"483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
            16,
        )
        .expect("curve constant"),
    )
});

/// An affine point on the curve. Derivation never yields the identity, so
/// the public type carries concrete coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    x: BigUint,
    y: BigUint,
}

impl Point {
    /// 33-byte SEC1 compressed encoding: parity prefix plus big-endian x.
    pub fn compress(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[0] = if self.y.bit(0) { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&be32(&self.x));
        out
    }

    /// 65-byte SEC1 uncompressed encoding: `04 || x || y`.
    pub fn uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&be32(&self.x));
        out[33..].copy_from_slice(&be32(&self.y));
        out
    }

    /// Big-endian x coordinate without a parity prefix.
    pub fn x_only(&self) -> [u8; 32] {
        be32(&self.x)
    }
}

fn be32(v: &BigUint) -> [u8; 32] {
    let bytes = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Derive the public key for a 32-byte big-endian private key.
///
/// Rejects scalars of zero or `>= n`, so the identity is unreachable.
pub fn derive_pubkey(privkey: &[u8]) -> Result<Point, Error> {
    if privkey.len() != 32 {
        return Err(Error::InvalidLength);
    }
    let k = BigUint::from_bytes_be(privkey);
    if k.is_zero() || k >= *N {
        return Err(Error::InvalidScalar);
    }
    let (x, y) = scalar_mul_base(&k);
    Ok(Point { x, y })
}

/// Decompress a 33-byte SEC1 public key.
///
/// Recovers `y` from `y^2 = x^3 + 7` and picks the root matching the
/// parity prefix.
pub fn decompress(compressed: &[u8]) -> Result<Point, Error> {
    if compressed.len() != 33 {
        return Err(Error::InvalidLength);
    }
    let prefix = compressed[0];
    if prefix != 0x02 && prefix != 0x03 {
        return Err(Error::InvalidPoint);
    }
    let x = BigUint::from_bytes_be(&compressed[1..]);
    if x >= *P {
        return Err(Error::InvalidPoint);
    }
    let rhs = field::add_mod(
        &field::mul_mod(&field::mul_mod(&x, &x, &P), &x, &P),
        &BigUint::from(7u32),
        &P,
    );
    let mut y = field::sqrt_mod(&rhs, &P).ok_or(Error::InvalidPoint)?;
    if y.bit(0) != (prefix == 0x03) {
        y = field::sub_mod(&BigUint::zero(), &y, &P);
    }
    Ok(Point { x, y })
}

/// Parse a SEC1 public key in either 33-byte compressed or 65-byte
/// uncompressed form, validating that it lies on the curve.
pub fn parse_pubkey(bytes: &[u8]) -> Result<Point, Error> {
    match bytes.len() {
        33 => decompress(bytes),
        65 => {
            if bytes[0] != 0x04 {
                return Err(Error::InvalidPoint);
            }
            let x = BigUint::from_bytes_be(&bytes[1..33]);
            let y = BigUint::from_bytes_be(&bytes[33..]);
            if x >= *P || y >= *P {
                return Err(Error::InvalidPoint);
            }
            let lhs = field::mul_mod(&y, &y, &P);
            let rhs = field::add_mod(
                &field::mul_mod(&field::mul_mod(&x, &x, &P), &x, &P),
                &BigUint::from(7u32),
                &P,
            );
            if lhs != rhs {
                return Err(Error::InvalidPoint);
            }
            Ok(Point { x, y })
        }
        _ => Err(Error::InvalidLength),
    }
}

/// Expand a compressed public key into the 65-byte uncompressed form.
pub fn expand_pubkey(compressed: &[u8]) -> Result<[u8; 65], Error> {
    Ok(decompress(compressed)?.uncompressed())
}

type Coords = (BigUint, BigUint);

fn point_double(p: &Coords) -> Option<Coords> {
    let (x, y) = p;
    if y.is_zero() {
        return None;
    }
    let two_y = field::add_mod(y, y, &P);
    let inv = field::invert(&two_y, &P)?;
    let x_sq = field::mul_mod(x, x, &P);
    let three_x_sq = field::mul_mod(&BigUint::from(3u32), &x_sq, &P);
    let lambda = field::mul_mod(&three_x_sq, &inv, &P);
    finish_add(&lambda, x, x, y)
}

fn point_add(p: &Coords, q: &Coords) -> Option<Coords> {
    let (x1, y1) = p;
    let (x2, y2) = q;
    if x1 == x2 {
        if field::add_mod(y1, y2, &P).is_zero() {
            return None;
        }
        return point_double(p);
    }
    let num = field::sub_mod(y2, y1, &P);
    let den = field::sub_mod(x2, x1, &P);
    let inv = field::invert(&den, &P)?;
    let lambda = field::mul_mod(&num, &inv, &P);
    finish_add(&lambda, x1, x2, y1)
}

fn finish_add(lambda: &BigUint, x1: &BigUint, x2: &BigUint, y1: &BigUint) -> Option<Coords> {
    let lambda_sq = field::mul_mod(lambda, lambda, &P);
    let x3 = field::sub_mod(&field::sub_mod(&lambda_sq, x1, &P), x2, &P);
    let y3 = field::sub_mod(&field::mul_mod(lambda, &field::sub_mod(x1, &x3, &P), &P), y1, &P);
    Some((x3, y3))
}

/// Double-and-add ladder over the bits of `k`, LSB first.
fn scalar_mul_base(k: &BigUint) -> Coords {
    let mut acc: Option<Coords> = None;
    let mut addend = G.clone();
    let bits = k.bits();
    for i in 0..bits {
        if k.bit(i) {
            acc = match acc {
                None => Some(addend.clone()),
                Some(ref a) => point_add(a, &addend),
            };
        }
        if i + 1 < bits {
            addend = point_double(&addend).expect("doubling a non-identity base multiple");
        }
    }
    acc.expect("scalar validated non-zero and below n")
}
