//! The Kaspa Bech32 variant.
//!
//! Deviates from BIP-173 in three places, which is why it lives in its own
//! module instead of a parameter on [`crate::bech32`]:
//!
//! - HRP expansion keeps only the low five bits of each character, with no
//!   high-bits block and no zero separator word.
//! - The polymod runs over a 40-bit accumulator and the checksum spans
//!   eight 5-bit words.
//! - The separator between HRP and data is `:`.
//!
//! The data part carries the version as a leading 5-bit word followed by
//! the repacked payload, and the check target is 1.

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

fn charset_value(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// The 40-bit checksum LFSR. Each step shifts the accumulator left five
/// bits and folds in generator rows selected by the pre-shift top five
/// bits.
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

/// Low five bits of each HRP character, nothing else.
fn hrp_expand(hrp: &str) -> Vec<u8> {
    hrp.bytes().map(|b| b & 0x1f).collect()
}

fn validate_hrp(hrp: &str) -> Result<(), Error> {
    if hrp.is_empty() || !hrp.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
        return Err(Error::InvalidBech32);
    }
    Ok(())
}

/// Compute the eight checksum words for an HRP and data-part words.
pub fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 8] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; 8]);
    let pm = polymod(&values) ^ 1;
    let mut out = [0u8; 8];
    for (i, word) in out.iter_mut().enumerate() {
        *word = ((pm >> (5 * (7 - i))) & 0x1f) as u8;
    }
    out
}

/// Encode a version and payload under the given HRP.
pub fn encode(hrp: &str, version: u8, payload: &[u8]) -> Result<String, Error> {
    validate_hrp(hrp)?;
    if version > 0x1f {
        return Err(Error::InvalidBech32);
    }
    let mut data = Vec::with_capacity(1 + payload.len() * 8 / 5 + 1);
    data.push(version);
    data.extend(words::to_words(payload));
    let checksum = create_checksum(hrp, &data);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + 8);
    out.push_str(hrp);
    out.push(':');
    for &w in data.iter().chain(checksum.iter()) {
        out.push(CHARSET[w as usize] as char);
    }
    Ok(out)
}

/// Decode an address into `(hrp, version, payload)`.
pub fn decode(s: &str) -> Result<(String, u8, Vec<u8>), Error> {
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::InvalidBech32);
    }
    let s = s.to_ascii_lowercase();
    let (hrp, data_part) = s.split_once(':').ok_or(Error::InvalidBech32)?;
    validate_hrp(hrp)?;
    if data_part.len() < 9 {
        return Err(Error::InvalidBech32);
    }
    let mut data = Vec::with_capacity(data_part.len());
    for &c in data_part.as_bytes() {
        data.push(charset_value(c).ok_or(Error::InvalidBech32)?);
    }
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(&data);
    if polymod(&values) != 1 {
        return Err(Error::InvalidChecksum);
    }
    let body = &data[..data.len() - 8];
    let version = body[0];
    let payload = words::from_words(&body[1..], true)?;
    Ok((hrp.to_string(), version, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polymod_known_answer() {
        let mut values = b"kaspa".iter().map(|&b| b & 0x1f).collect::<Vec<u8>>();
        values.extend_from_slice(&[0; 8]);
        assert_eq!(polymod(&values), 0x23d4db5fa6);
    }

    #[test]
    fn schnorr_pubkey_addresses() {
        let cases = [
            (
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
                "kaspa:q0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq0mywgqyp",
            ),
            (
                "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
                "kaspa:qccz8l9zpa47k6vz9gphftsrumpw80rjt3nhnefat4symjhrsnmjstkrxkccw",
            ),
        ];
        for (x_only_hex, expected) in cases {
            let x_only = hex::decode(x_only_hex).unwrap();
            assert_eq!(encode("kaspa", 0, &x_only).unwrap(), expected);

            let (hrp, version, payload) = decode(expected).unwrap();
            assert_eq!(hrp, "kaspa");
            assert_eq!(version, 0);
            assert_eq!(hex::encode(payload), x_only_hex);
        }
    }

    #[test]
    fn checksum_words_match_encoding() {
        let payload = [0x11u8; 32];
        let addr = encode("kaspa", 0, &payload).unwrap();
        let data_part = addr.split_once(':').unwrap().1;
        let words_all: Vec<u8> = data_part
            .bytes()
            .map(|c| CHARSET.iter().position(|&a| a == c).unwrap() as u8)
            .collect();
        let expected = create_checksum("kaspa", &words_all[..words_all.len() - 8]);
        assert_eq!(&words_all[words_all.len() - 8..], &expected);
    }

    #[test]
    fn character_flips_break_the_checksum() {
        let addr = encode("kaspa", 0, &[0x42u8; 32]).unwrap();
        let colon = addr.find(':').unwrap();
        for i in colon + 1..addr.len() {
            let mut chars: Vec<u8> = addr.bytes().collect();
            chars[i] = if chars[i] == b'q' { b'p' } else { b'q' };
            let tampered = String::from_utf8(chars).unwrap();
            assert!(decode(&tampered).is_err(), "flip at {i} must fail");
        }
    }

    #[test]
    fn structural_rejections() {
        assert_eq!(decode("kaspaq0xlxvlh"), Err(Error::InvalidBech32));
        assert_eq!(decode("kaspa:short"), Err(Error::InvalidBech32));
        assert_eq!(encode("KASPA", 0, &[0; 32]), Err(Error::InvalidBech32));
        assert_eq!(encode("kaspa", 32, &[0; 32]), Err(Error::InvalidBech32));
    }
}
