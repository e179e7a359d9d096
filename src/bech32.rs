//! Bech32 (BIP-173) encoding and decoding.
//!
//! Kept deliberately separate from the [`crate::kaspa`] variant: the two
//! share only the 8↔5 repacker in [`crate::words`]. Everything here (HRP
//! expansion, the 30-bit polymod, the six-word checksum) is the Bitcoin
//! flavor.

use crate::error::Error;

pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Maximum overall string length permitted by BIP-173.
const MAX_LENGTH: usize = 90;

fn charset_value(c: u8) -> Option<u8> {
    CHARSET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// The BIP-173 checksum LFSR over GF(2^30).
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(v);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

/// `(h >> 5 for h in hrp) || [0] || (h & 31 for h in hrp)`.
fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
    out.extend(bytes.iter().map(|&b| b >> 5));
    out.push(0);
    out.extend(bytes.iter().map(|&b| b & 0x1f));
    out
}

fn validate_hrp(hrp: &str) -> Result<(), Error> {
    if hrp.is_empty() || hrp.len() > 83 {
        return Err(Error::InvalidBech32);
    }
    if !hrp
        .bytes()
        .all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase())
    {
        return Err(Error::InvalidBech32);
    }
    Ok(())
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; 6]);
    let pm = polymod(&values) ^ 1;
    let mut out = [0u8; 6];
    for (i, word) in out.iter_mut().enumerate() {
        *word = ((pm >> (5 * (5 - i))) & 0x1f) as u8;
    }
    out
}

/// Encode an HRP and a sequence of 5-bit words into a Bech32 string.
pub fn encode(hrp: &str, words: &[u8]) -> Result<String, Error> {
    validate_hrp(hrp)?;
    if words.iter().any(|&w| w > 0x1f) {
        return Err(Error::InvalidBech32);
    }
    if hrp.len() + 1 + words.len() + 6 > MAX_LENGTH {
        return Err(Error::InvalidBech32);
    }
    let checksum = create_checksum(hrp, words);
    let mut out = String::with_capacity(hrp.len() + 1 + words.len() + 6);
    out.push_str(hrp);
    out.push('1');
    for &w in words.iter().chain(checksum.iter()) {
        out.push(CHARSET[w as usize] as char);
    }
    Ok(out)
}

/// Decode a Bech32 string into its HRP and data words (checksum stripped).
///
/// Mixed-case input, a missing separator, an oversized string, or a bad
/// HRP raise [`Error::InvalidBech32`]; a checksum that fails to verify
/// raises [`Error::InvalidChecksum`].
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Error> {
    if s.len() > MAX_LENGTH {
        return Err(Error::InvalidBech32);
    }
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::InvalidBech32);
    }
    let s = s.to_ascii_lowercase();
    let sep = s.rfind('1').ok_or(Error::InvalidBech32)?;
    if sep == 0 || sep + 7 > s.len() {
        // HRP must be non-empty, data part must hold at least a checksum.
        return Err(Error::InvalidBech32);
    }
    let hrp = &s[..sep];
    validate_hrp(hrp)?;
    let mut words = Vec::with_capacity(s.len() - sep - 1);
    for &c in s.as_bytes()[sep + 1..].iter() {
        words.push(charset_value(c).ok_or(Error::InvalidBech32)?);
    }
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(&words);
    if polymod(&values) != 1 {
        return Err(Error::InvalidChecksum);
    }
    words.truncate(words.len() - 6);
    Ok((hrp.to_string(), words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::to_words;

    #[test]
    fn bip173_valid_strings() {
        for s in [
            "A12UEL5L",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "11qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqc8247j",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
        ] {
            assert!(decode(s).is_ok(), "{s} should decode");
        }
    }

    #[test]
    fn bip173_invalid_strings() {
        // (string, expected failure class)
        let cases = [
            ("pzry9x0s3jn54khce6mua7l", Error::InvalidBech32), // no separator
            ("1pzry9x0s3jn54khce6mua7l", Error::InvalidBech32), // empty HRP
            ("x1b4n0q5v", Error::InvalidBech32),               // invalid data char
            ("li1dgmt3", Error::InvalidBech32),                // too-short checksum
            ("A1G7SGD8", Error::InvalidChecksum),              // checksum mismatch
            ("10a06t8", Error::InvalidBech32),                 // empty HRP
            ("1qzzfhee", Error::InvalidBech32),                // empty HRP
        ];
        for (s, expected) in cases {
            assert_eq!(decode(s).unwrap_err(), expected, "{s}");
        }
    }

    #[test]
    fn mixed_case_is_rejected() {
        assert_eq!(decode("A12uEL5L"), Err(Error::InvalidBech32));
    }

    #[test]
    fn segwit_program_vector() {
        let program = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let mut words = vec![0u8];
        words.extend(to_words(&program));
        let addr = encode("bc", &words).unwrap();
        assert_eq!(addr, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

        let (hrp, decoded) = decode(&addr).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(decoded, words);
        // Uppercase form decodes to the same data.
        let (hrp2, decoded2) = decode(&addr.to_ascii_uppercase()).unwrap();
        assert_eq!((hrp2, decoded2), (hrp, decoded));
    }

    #[test]
    fn single_character_flips_break_the_checksum() {
        let addr = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
        for i in 3..addr.len() {
            let mut chars: Vec<u8> = addr.bytes().collect();
            chars[i] = if chars[i] == b'q' { b'p' } else { b'q' };
            let tampered = String::from_utf8(chars).unwrap();
            if tampered == addr {
                continue;
            }
            assert!(decode(&tampered).is_err(), "flip at {i} must fail");
        }
    }

    #[test]
    fn oversized_strings_are_rejected() {
        let words = vec![0u8; 83];
        assert_eq!(encode("bc", &words), Err(Error::InvalidBech32));
    }
}
