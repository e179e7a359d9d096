//! Nimiq addresses: Blake2b-256 pubkey hash, custom Base32, IBAN checksum.
//!
//! Layout of the 36-character address:
//!
//! | Chars | Content |
//! |-------|---------|
//! | 0..2  | country code `NQ` |
//! | 2..4  | IBAN mod-97 check digits |
//! | 4..36 | 20 hash bytes in 5-bit groups over [`ALPHABET`] |
//!
//! The check digits satisfy the standard IBAN rule: moving the first four
//! characters to the end and reading letters as base-36 values yields a
//! number ≡ 1 (mod 97).

use crate::error::Error;
use crate::hashes;
use crate::words;

/// Nimiq's Base32 alphabet (no I, O, W or Z).
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKLMNPQRSTUVXY";

fn alphabet_value(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Running mod-97 over the decimal expansion of a base-36 string.
fn iban_mod97(chars: &str) -> Result<u32, Error> {
    let mut acc: u32 = 0;
    for c in chars.bytes() {
        let value = match c {
            b'0'..=b'9' => u32::from(c - b'0'),
            b'A'..=b'Z' => u32::from(c - b'A') + 10,
            _ => return Err(Error::InvalidBase58),
        };
        if value < 10 {
            acc = (acc * 10 + value) % 97;
        } else {
            acc = (acc * 100 + value) % 97;
        }
    }
    Ok(acc)
}

/// Derive the address for a 32-byte Ed25519 public key.
///
/// Hash, truncate to 160 bits, encode, then prepend `NQ` and the check
/// digits. Output is the compact form; see [`format_friendly`] for the
/// spaced display variant.
pub fn address_from_pubkey(pubkey: &[u8]) -> Result<String, Error> {
    if pubkey.len() != 32 {
        return Err(Error::InvalidLength);
    }
    let hash = hashes::blake2b_256(pubkey);
    let mut encoded = String::with_capacity(32);
    for w in words::to_words(&hash[..20]) {
        encoded.push(ALPHABET[w as usize] as char);
    }
    let residue = iban_mod97(&format!("{encoded}NQ00"))?;
    let check = 98 - residue;
    Ok(format!("NQ{check:02}{encoded}"))
}

/// Verify an address and return the 20-byte public-key hash it encodes.
///
/// Spaces are ignored; anything else must be the canonical upper-case
/// form. A failed IBAN check (including a wrong country code) raises
/// [`Error::InvalidChecksum`].
pub fn validate(address: &str) -> Result<[u8; 20], Error> {
    let compact: String = address.chars().filter(|c| *c != ' ').collect();
    if !compact.is_ascii() || compact.len() != 36 {
        return Err(Error::InvalidLength);
    }
    let (head, body) = compact.split_at(4);
    if !head.starts_with("NQ") || !head[2..].bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidChecksum);
    }
    for c in body.bytes() {
        if alphabet_value(c).is_none() {
            return Err(Error::InvalidBase58);
        }
    }
    // IBAN rule: body then head must leave residue 1.
    if iban_mod97(&format!("{body}{head}"))? != 1 {
        return Err(Error::InvalidChecksum);
    }
    let word_values: Vec<u8> = body
        .bytes()
        .map(|c| alphabet_value(c).expect("body validated against alphabet"))
        .collect();
    let bytes = words::from_words(&word_values, true)?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Space the compact form into the usual 4-character display groups.
pub fn format_friendly(address: &str) -> String {
    let compact: Vec<char> = address.chars().filter(|c| *c != ' ').collect();
    let mut out = String::with_capacity(compact.len() + compact.len() / 4);
    for (i, c) in compact.iter().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}
