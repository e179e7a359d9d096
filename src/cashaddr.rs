//! CashAddr, the Bitcoin Cash Bech32 variant.
//!
//! Differences from BIP-173: a 40-bit polymod with its own generator rows,
//! an eight-word checksum, `:` as the separator, and a prefix expansion
//! that keeps only the low five bits of each prefix character followed by
//! a single zero. The version byte packs the address type into its upper
//! bits and a hash-size code into its lower three.

use crate::error::Error;
use crate::words;

use crate::bech32::CHARSET;

const GENERATOR: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Payload sizes addressable by the three size-code bits.
const HASH_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

pub const DEFAULT_PREFIX: &str = "bitcoincash";

fn charset_value(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// The 40-bit checksum LFSR.
pub fn polymod(values: &[u8]) -> u64 {
    let mut chk: u64 = 1;
    for &v in values {
        let top = chk >> 35;
        chk = ((chk & 0x07_ffff_ffff) << 5) ^ u64::from(v);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

/// Low five bits of each prefix character, then a zero separator word.
fn prefix_expand(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}

fn validate_prefix(prefix: &str) -> Result<(), Error> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return Err(Error::InvalidBech32);
    }
    Ok(())
}

fn size_code(payload_len: usize) -> Option<u8> {
    HASH_SIZES.iter().position(|&s| s == payload_len).map(|i| i as u8)
}

/// Encode a payload under the given prefix and packed version byte.
///
/// The version's size-code bits must agree with the payload length
/// (`0` covers the common 20-byte P2KH case).
pub fn encode(prefix: &str, version: u8, payload: &[u8]) -> Result<String, Error> {
    validate_prefix(prefix)?;
    if version & 0x80 != 0 {
        return Err(Error::InvalidBech32);
    }
    let code = size_code(payload.len()).ok_or(Error::InvalidLength)?;
    if version & 0x07 != code {
        return Err(Error::InvalidLength);
    }
    let mut framed = Vec::with_capacity(payload.len() + 1);
    framed.push(version);
    framed.extend_from_slice(payload);
    let data = words::to_words(&framed);

    let mut values = prefix_expand(prefix);
    values.extend_from_slice(&data);
    values.extend_from_slice(&[0; 8]);
    let pm = polymod(&values) ^ 1;

    let mut out = String::with_capacity(prefix.len() + 1 + data.len() + 8);
    out.push_str(prefix);
    out.push(':');
    for &w in &data {
        out.push(CHARSET[w as usize] as char);
    }
    for i in 0..8 {
        out.push(CHARSET[((pm >> (5 * (7 - i))) & 0x1f) as usize] as char);
    }
    Ok(out)
}

/// Decode a CashAddr string into `(prefix, version, payload)`.
///
/// Prefix-less input is accepted and assumed to be under
/// [`DEFAULT_PREFIX`]; encoding never omits the prefix.
pub fn decode(s: &str) -> Result<(String, u8, Vec<u8>), Error> {
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::InvalidBech32);
    }
    let s = s.to_ascii_lowercase();
    let (prefix, data_part) = match s.split_once(':') {
        Some((p, d)) => (p.to_string(), d),
        None => (DEFAULT_PREFIX.to_string(), s.as_str()),
    };
    validate_prefix(&prefix)?;
    if data_part.len() < 9 {
        return Err(Error::InvalidBech32);
    }
    let mut data = Vec::with_capacity(data_part.len());
    for &c in data_part.as_bytes() {
        data.push(charset_value(c).ok_or(Error::InvalidBech32)?);
    }
    let mut values = prefix_expand(&prefix);
    values.extend_from_slice(&data);
    if polymod(&values) != 1 {
        return Err(Error::InvalidChecksum);
    }
    let framed = words::from_words(&data[..data.len() - 8], true)?;
    if framed.is_empty() {
        return Err(Error::InvalidLength);
    }
    let version = framed[0];
    let payload = framed[1..].to_vec();
    if version & 0x80 != 0 {
        return Err(Error::InvalidBech32);
    }
    if HASH_SIZES[(version & 0x07) as usize] != payload.len() {
        return Err(Error::InvalidLength);
    }
    Ok((prefix, version, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p2kh_reference_vectors() {
        let cases = [
            (
                "76a04053bda0a88bda5177b86a15c3b29f559873",
                "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a",
            ),
            (
                "751e76e8199196d454941c45d1b3a323f1433bd6",
                "bitcoincash:qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h",
            ),
            (
                "011f28e473c95f4013d7d53ec5fbc3b42df8ed10",
                "bitcoincash:qqq3728yw0y47sqn6l2na30mcw6zm78dzqre909m2r",
            ),
        ];
        for (hash_hex, expected) in cases {
            let hash = hex::decode(hash_hex).unwrap();
            assert_eq!(encode("bitcoincash", 0, &hash).unwrap(), expected);

            let (prefix, version, payload) = decode(expected).unwrap();
            assert_eq!(prefix, "bitcoincash");
            assert_eq!(version, 0);
            assert_eq!(hex::encode(payload), hash_hex);
        }
    }

    #[test]
    fn prefixless_and_uppercase_forms_decode() {
        let bare = "qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";
        let (prefix, version, payload) = decode(bare).unwrap();
        assert_eq!(prefix, "bitcoincash");
        assert_eq!(version, 0);
        assert_eq!(
            hex::encode(payload),
            "76a04053bda0a88bda5177b86a15c3b29f559873"
        );

        let upper = "BITCOINCASH:QPM2QSZNHKS23Z7629MMS6S4CWEF74VCWVY22GDX6A";
        assert!(decode(upper).is_ok());
        assert_eq!(
            decode("bitcoincash:qpm2qszNhks23z7629mms6s4cwef74vcwvy22gdx6a"),
            Err(Error::InvalidBech32)
        );
    }

    #[test]
    fn character_flips_break_the_checksum() {
        let addr = "bitcoincash:qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h";
        let colon = addr.find(':').unwrap();
        for i in colon + 1..addr.len() {
            let mut chars: Vec<u8> = addr.bytes().collect();
            chars[i] = if chars[i] == b'q' { b'p' } else { b'q' };
            let tampered = String::from_utf8(chars).unwrap();
            assert!(decode(&tampered).is_err(), "flip at {i} must fail");
        }
    }

    #[test]
    fn rejects_unsupported_payload_sizes() {
        assert_eq!(
            encode("bitcoincash", 0, &[0u8; 21]),
            Err(Error::InvalidLength)
        );
    }

    #[test]
    fn longer_hash_sizes_round_trip() {
        let hash = [0x5au8; 32];
        let addr = encode("bitcoincash", 0x03, &hash).unwrap();
        let (_, version, payload) = decode(&addr).unwrap();
        assert_eq!(version & 0x07, 3);
        assert_eq!(payload, hash);
    }
}
