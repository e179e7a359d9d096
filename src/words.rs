//! 8-bit ↔ 5-bit repacking shared by the Bech32 codec family.
//!
//! Bits are consumed MSB-first. Encoding pads the final word with zero
//! bits; decoding in strict mode enforces the BIP-173 padding rules (at
//! most four leftover bits, all zero).

use crate::error::Error;

/// Convert bytes into 5-bit words, padding the final word with zeros.
pub fn to_words(data: &[u8]) -> Vec<u8> {
    let mut words = Vec::with_capacity(data.len() * 8 / 5 + 1);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            words.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        words.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    words
}

/// Convert 5-bit words back into bytes.
///
/// With `strict` set, leftover padding must be fewer than five bits and
/// all zero; otherwise the padding is silently dropped (callers control
/// strictness).
pub fn from_words(words: &[u8], strict: bool) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(words.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &word in words {
        if word > 0x1f {
            return Err(Error::InvalidBech32);
        }
        acc = (acc << 5) | u32::from(word);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if strict && (bits >= 5 || (acc & ((1 << bits) - 1)) != 0) {
        return Err(Error::InvalidBech32);
    }
    Ok(out)
}
