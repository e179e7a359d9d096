//! Base58 and Base58Check, plus WIF private-key encoding.
//!
//! The digit conversion goes through a big integer: bytes are read as one
//! big-endian number and repeatedly divided by 58, then one `'1'` is
//! prefixed per leading zero byte. Base58Check appends the first four bytes
//! of a double SHA-256 over the payload.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::Error;
use crate::hashes;

pub const ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn digit_value(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Encode bytes as Base58.
pub fn encode(data: &[u8]) -> String {
    let mut n = BigUint::from_bytes_be(data);
    let radix = BigUint::from(58u32);
    let mut digits = Vec::new();
    while !n.is_zero() {
        let rem = (&n % &radix)
            .to_u8()
            .expect("remainder below 58 fits in u8");
        digits.push(ALPHABET[rem as usize]);
        n /= &radix;
    }
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();
    let mut out = Vec::with_capacity(leading_zeros + digits.len());
    out.extend(std::iter::repeat(b'1').take(leading_zeros));
    out.extend(digits.iter().rev());
    String::from_utf8(out).expect("alphabet is ASCII")
}

/// Decode a Base58 string. Any character outside the alphabet is rejected.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    let radix = BigUint::from(58u32);
    let mut n = BigUint::zero();
    for &c in s.as_bytes() {
        let digit = digit_value(c).ok_or(Error::InvalidBase58)?;
        n = n * &radix + BigUint::from(digit);
    }
    let body = if n.is_zero() { Vec::new() } else { n.to_bytes_be() };
    let leading_ones = s.bytes().take_while(|&c| c == b'1').count();
    let mut out = vec![0u8; leading_ones];
    out.extend_from_slice(&body);
    Ok(out)
}

/// Base58Check: append `SHA256(SHA256(payload))[0..4]` and encode.
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = hashes::sha256(&hashes::sha256(payload));
    let mut framed = Vec::with_capacity(payload.len() + 4);
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&checksum[..4]);
    encode(&framed)
}

/// Decode a Base58Check string, verifying and stripping the checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>, Error> {
    let raw = decode(s)?;
    if raw.len() < 4 {
        return Err(Error::InvalidLength);
    }
    let (payload, checksum) = raw.split_at(raw.len() - 4);
    let expected = hashes::sha256(&hashes::sha256(payload));
    if checksum != &expected[..4] {
        return Err(Error::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

/// Wallet Import Format: `version || privkey || [0x01 if compressed]`,
/// Base58Check-encoded.
pub fn wif_encode(version: u8, privkey: &[u8], compressed: bool) -> Result<String, Error> {
    if privkey.len() != 32 {
        return Err(Error::InvalidLength);
    }
    let mut payload = Vec::with_capacity(34);
    payload.push(version);
    payload.extend_from_slice(privkey);
    if compressed {
        payload.push(0x01);
    }
    Ok(check_encode(&payload))
}
