//! Nano accounts: custom Base32 over the public key with a reversed
//! Blake2b-5 checksum, plus the NANO→raw amount conversion.
//!
//! A `nano_` account string carries 60 data characters: 52 encode the
//! 256-bit public key behind four leading zero bits, the final 8 encode
//! the five-byte Blake2b digest of the key, byte-reversed.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Error;
use crate::hashes;
use crate::words;

/// Nano's Base32 alphabet (no 0, 2, l or v).
pub const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

const PREFIX: &str = "nano_";
/// Pre-rebrand prefix, still accepted on decode.
const LEGACY_PREFIX: &str = "xrb_";

/// 10^30 raw per NANO.
const RAW_DIGITS: usize = 30;

fn alphabet_value(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Pack the 32 key bytes into 52 words behind four zero pad bits.
fn key_words(pubkey: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(52);
    let mut acc: u32 = 0;
    let mut bits: u32 = 4;
    for &byte in pubkey {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    out
}

/// Derive the account string for a 32-byte Ed25519 (Blake2b) public key.
pub fn address_from_pubkey(pubkey: &[u8]) -> Result<String, Error> {
    if pubkey.len() != 32 {
        return Err(Error::InvalidLength);
    }
    let mut checksum = hashes::blake2b(pubkey, 5)?;
    checksum.reverse();

    let mut out = String::with_capacity(PREFIX.len() + 60);
    out.push_str(PREFIX);
    for w in key_words(pubkey) {
        out.push(ALPHABET[w as usize] as char);
    }
    for w in words::to_words(&checksum) {
        out.push(ALPHABET[w as usize] as char);
    }
    Ok(out)
}

/// Decode an account string back into the 32-byte public key, verifying
/// the checksum.
pub fn decode(address: &str) -> Result<[u8; 32], Error> {
    let body = address
        .strip_prefix(PREFIX)
        .or_else(|| address.strip_prefix(LEGACY_PREFIX))
        .ok_or(Error::InvalidChecksum)?;
    if body.len() != 60 {
        return Err(Error::InvalidLength);
    }
    let mut values = Vec::with_capacity(60);
    for &c in body.as_bytes() {
        values.push(alphabet_value(c).ok_or(Error::InvalidBase58)?);
    }
    // 52 words hold 260 bits; the leading four must be the zero padding.
    if values[0] > 1 {
        return Err(Error::InvalidBase58);
    }
    let mut pubkey = [0u8; 32];
    let mut acc: u32 = u32::from(values[0]);
    let mut bits: u32 = 1;
    let mut idx = 0;
    for &w in &values[1..52] {
        acc = (acc << 5) | u32::from(w);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            pubkey[idx] = ((acc >> bits) & 0xff) as u8;
            idx += 1;
        }
    }

    let mut expected = hashes::blake2b(&pubkey, 5)?;
    expected.reverse();
    let checksum = words::from_words(&values[52..], true)?;
    if checksum != expected {
        return Err(Error::InvalidChecksum);
    }
    Ok(pubkey)
}

/// Convert a decimal NANO amount into its raw integer representation
/// (1 NANO = 10^30 raw). Accepts an optional fractional part of up to 30
/// digits and emits the canonical decimal form.
pub fn to_raw(amount: &str) -> Result<String, Error> {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::InvalidDecimal);
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::InvalidDecimal);
    }
    if frac_part.len() > RAW_DIGITS {
        return Err(Error::InvalidDecimal);
    }

    // Shifting by 10^30 is appending thirty digits; the big integer then
    // canonicalizes leading zeros on re-emission.
    let mut digits = String::with_capacity(int_part.len() + RAW_DIGITS);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    for _ in frac_part.len()..RAW_DIGITS {
        digits.push('0');
    }
    Ok(parse_digits(&digits).to_str_radix(10))
}

fn parse_digits(digits: &str) -> BigUint {
    let mut value = BigUint::zero();
    for b in digits.bytes() {
        value = value * 10u32 + u32::from(b - b'0');
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ed25519;

    #[test]
    fn official_account_chain() {
        // Nano developer docs: seed 0, account index 0.
        let privkey =
            hex::decode("9f0e444c69f77a49bd0be89db92c38fe713e0963165cca12faf5712d7657120f")
                .unwrap();
        let pubkey = ed25519::derive_pubkey_blake2b(&privkey).unwrap();
        assert_eq!(
            address_from_pubkey(&pubkey).unwrap(),
            "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7"
        );
    }

    #[test]
    fn burn_account_encoding() {
        assert_eq!(
            address_from_pubkey(&[0u8; 32]).unwrap(),
            "nano_1111111111111111111111111111111111111111111111111111hifc8npp"
        );
    }

    #[test]
    fn blake2b_seed_vector() {
        let seed =
            hex::decode("9eac269fb28cbeab3c7cd77b60daa4590e1316b6e9a71e5e58dfeaa40d9ebc15")
                .unwrap();
        let pubkey = ed25519::derive_pubkey_blake2b(&seed).unwrap();
        assert_eq!(
            address_from_pubkey(&pubkey).unwrap(),
            "nano_15s3t9kbaqa7ch91zcfb4ttnha1q3o74zs6t55dmpwzf59zjmfsah8ehy5df"
        );
    }

    #[test]
    fn decode_round_trip_and_legacy_prefix() {
        let pubkey = [0xc7u8; 32];
        let address = address_from_pubkey(&pubkey).unwrap();
        assert_eq!(decode(&address).unwrap(), pubkey);

        let legacy = address.replacen("nano_", "xrb_", 1);
        assert_eq!(decode(&legacy).unwrap(), pubkey);
    }

    #[test]
    fn decode_verifies_published_account() {
        let pubkey = decode(
            "nano_1mbtirc4x3kixfy5wufxaqakd3gbojpn6gpmk6kjiyngnjwgy6yty3txgztq",
        )
        .unwrap();
        assert_eq!(
            hex::encode(pubkey),
            "4d3a86142e8650eb7c3e6dbd45d12585c9ac6d423ad39125187a8ea478ef13da"
        );
    }

    #[test]
    fn character_flips_break_the_checksum() {
        let address = address_from_pubkey(&[0x42u8; 32]).unwrap();
        for i in PREFIX.len()..address.len() {
            let mut chars: Vec<u8> = address.bytes().collect();
            chars[i] = if chars[i] == b'3' { b'4' } else { b'3' };
            let tampered = String::from_utf8(chars).unwrap();
            assert!(decode(&tampered).is_err(), "flip at {i} must fail");
        }
    }

    #[test]
    fn to_raw_conversions() {
        assert_eq!(to_raw("1").unwrap(), format!("1{}", "0".repeat(30)));
        assert_eq!(to_raw("0").unwrap(), "0");
        assert_eq!(to_raw("1.5").unwrap(), format!("15{}", "0".repeat(29)));
        assert_eq!(
            to_raw("123.456").unwrap(),
            format!("123456{}", "0".repeat(27))
        );
        assert_eq!(to_raw("0.000000000000000000000000000001").unwrap(), "1");
        assert_eq!(to_raw(".5").unwrap(), format!("5{}", "0".repeat(29)));
    }

    #[test]
    fn to_raw_rejects_malformed_amounts() {
        for bad in ["", ".", "1..2", "1,5", "abc", "1.2.3",
                    "0.0000000000000000000000000000001"] {
            assert_eq!(to_raw(bad), Err(Error::InvalidDecimal), "{bad:?}");
        }
    }
}
