//! Known-answer self-checks.
//!
//! Each function exercises one subsystem against a fixed vector and
//! reports a plain boolean, swallowing internal errors, so an embedding
//! application can gate itself on the whole suite before touching real
//! keys.

use crate::address;
use crate::base58;
use crate::bech32 as bech32_codec;
use crate::cashaddr as cashaddr_codec;
use crate::hashes;
use crate::kaspa as kaspa_codec;
use crate::secp256k1 as secp;
use crate::words;

/// Scalar 1 must map to the generator point.
pub fn secp256k1() -> bool {
    let mut privkey = [0u8; 32];
    privkey[31] = 1;
    match secp::derive_pubkey(&privkey) {
        Ok(point) => {
            hex::encode(point.compress())
                == "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        }
        Err(_) => false,
    }
}

/// Witness-program vector from BIP-173, both directions.
pub fn bech32() -> bool {
    let program = match hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6") {
        Ok(p) => p,
        Err(_) => return false,
    };
    let mut data = vec![0u8];
    data.extend(words::to_words(&program));
    match bech32_codec::encode("bc", &data) {
        Ok(addr) if addr == "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4" => {
            bech32_codec::decode(&addr).map(|(_, words)| words == data).unwrap_or(false)
        }
        _ => false,
    }
}

/// Published P2KH conversion vector.
pub fn cashaddr() -> bool {
    let hash = match hex::decode("76a04053bda0a88bda5177b86a15c3b29f559873") {
        Ok(h) => h,
        Err(_) => return false,
    };
    cashaddr_codec::encode("bitcoincash", 0, &hash)
        .map(|a| a == "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a")
        .unwrap_or(false)
}

/// Keccak-256 must use the pre-NIST 0x01 padding.
pub fn keccak256() -> bool {
    hex::encode(hashes::keccak256(b""))
        == "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
}

/// Kaspa address for the generator's x coordinate, both directions.
pub fn kaspa() -> bool {
    let x_only = match hex::decode(
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    ) {
        Ok(x) => x,
        Err(_) => return false,
    };
    let expected = "kaspa:q0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq0mywgqyp";
    match kaspa_codec::encode(address::KASPA_HRP, 0, &x_only) {
        Ok(addr) if addr == expected => kaspa_codec::decode(&addr)
            .map(|(_, version, payload)| version == 0 && payload == x_only)
            .unwrap_or(false),
        _ => false,
    }
}

/// Base58Check round-trip over a known address payload.
pub fn base58check() -> bool {
    let payload = match hex::decode("00751e76e8199196d454941c45d1b3a323f1433bd6") {
        Ok(p) => p,
        Err(_) => return false,
    };
    base58::check_encode(&payload) == "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        && base58::check_decode("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH")
            .map(|d| d == payload)
            .unwrap_or(false)
}

/// Run the whole suite.
pub fn all() -> bool {
    secp256k1() && bech32() && cashaddr() && keccak256() && kaspa() && base58check()
}
