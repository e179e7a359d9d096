//! Per-currency address assembly.
//!
//! Wires the curve engines into the codec family. Derivation rules:
//!
//! | Chain | Method |
//! |-------|--------|
//! | Bitcoin/Litecoin/Dogecoin/Dash | Base58Check over `version || hash160(pub)` |
//! | Bitcoin/Litecoin SegWit | Bech32 over `[0] || hash160(pub)` words |
//! | Ethereum | `keccak256(uncompressed[1..])[12..]`, EIP-55 cased |
//! | Bitcoin Cash | legacy hash re-encoded as CashAddr |
//! | Kaspa | x-only pubkey under the Kaspa Bech32 variant |
//!
//! Nimiq and Nano builders live in their own modules next to their codecs.

use crate::base58;
use crate::bech32;
use crate::cashaddr;
use crate::error::Error;
use crate::hashes;
use crate::kaspa;
use crate::secp256k1;
use crate::words;

// ============================================================================
// NETWORK CONSTANTS
// ============================================================================

pub const BITCOIN_P2PKH_VERSION: u8 = 0x00;
pub const LITECOIN_P2PKH_VERSION: u8 = 0x30;
pub const DOGECOIN_P2PKH_VERSION: u8 = 0x1e;
pub const DASH_P2PKH_VERSION: u8 = 0x4c;

pub const BITCOIN_WIF_VERSION: u8 = 0x80;
pub const LITECOIN_WIF_VERSION: u8 = 0xb0;
pub const DOGECOIN_WIF_VERSION: u8 = 0x9e;
pub const DASH_WIF_VERSION: u8 = 0xcc;

pub const BITCOIN_HRP: &str = "bc";
pub const LITECOIN_HRP: &str = "ltc";
pub const KASPA_HRP: &str = "kaspa";

/// A SEC1 public key in compressed (33-byte) or uncompressed (65-byte)
/// form, shape-checked but not curve-checked.
fn check_pubkey(pubkey: &[u8]) -> Result<(), Error> {
    match (pubkey.len(), pubkey.first()) {
        (33, Some(0x02 | 0x03)) | (65, Some(0x04)) => Ok(()),
        (33, _) | (65, _) => Err(Error::InvalidPoint),
        _ => Err(Error::InvalidLength),
    }
}

// ============================================================================
// BASE58 NETWORKS
// ============================================================================

/// Legacy pay-to-pubkey-hash address for any Base58 network.
pub fn p2pkh(version: u8, pubkey: &[u8]) -> Result<String, Error> {
    check_pubkey(pubkey)?;
    let hash = hashes::hash160(pubkey);
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&hash);
    Ok(base58::check_encode(&payload))
}

// ============================================================================
// SEGWIT
// ============================================================================

/// Native SegWit v0 pay-to-witness-pubkey-hash address.
pub fn segwit(hrp: &str, pubkey: &[u8]) -> Result<String, Error> {
    check_pubkey(pubkey)?;
    let hash = hashes::hash160(pubkey);
    let mut data = Vec::with_capacity(33);
    data.push(0); // witness version
    data.extend(words::to_words(&hash));
    bech32::encode(hrp, &data)
}

// ============================================================================
// ETHEREUM
// ============================================================================

/// Ethereum address with its display forms, mirroring how wallets surface
/// both the raw and checksummed spellings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthereumAddress {
    /// 20 raw bytes.
    pub bytes: [u8; 20],
    /// `0x` + 40 lowercase hex.
    pub hex_lower: String,
    /// EIP-55 checksummed.
    pub eip55: String,
}

/// Derive the Ethereum address from an uncompressed public key (with or
/// without the `0x04` prefix byte).
pub fn ethereum(pubkey: &[u8]) -> Result<EthereumAddress, Error> {
    let xy: &[u8] = match pubkey.len() {
        65 if pubkey[0] == 0x04 => &pubkey[1..],
        65 => return Err(Error::InvalidPoint),
        64 => pubkey,
        _ => return Err(Error::InvalidLength),
    };
    let digest = hashes::keccak256(xy);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);

    let hex_lower = format!("0x{}", hex::encode(bytes));
    let eip55 = to_eip55(&hex_lower)?;
    Ok(EthereumAddress {
        bytes,
        hex_lower,
        eip55,
    })
}

/// Apply EIP-55 checksum casing to a hex address.
///
/// The input is lower-cased before hashing, so the function is idempotent
/// over its own output. A nibble of `keccak256(lowercase_hex)` at or above
/// 8 upper-cases the corresponding character.
pub fn to_eip55(address: &str) -> Result<String, Error> {
    let stripped = address.strip_prefix("0x").unwrap_or(address);
    if stripped.len() != 40 || !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex);
    }
    let lower = stripped.to_ascii_lowercase();
    let digest = hashes::keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

// ============================================================================
// BITCOIN CASH
// ============================================================================

/// Re-encode a legacy Bitcoin address as a CashAddr string.
pub fn cashaddr_from_legacy(legacy: &str) -> Result<String, Error> {
    let payload = base58::check_decode(legacy)?;
    if payload.len() != 21 {
        return Err(Error::InvalidLength);
    }
    cashaddr::encode(cashaddr::DEFAULT_PREFIX, 0, &payload[1..])
}

// ============================================================================
// KASPA
// ============================================================================

/// Kaspa address from a compressed (33-byte) or x-only (32-byte) public
/// key; the parity prefix is dropped either way.
pub fn kaspa(pubkey: &[u8]) -> Result<String, Error> {
    let x_only: &[u8] = match (pubkey.len(), pubkey.first()) {
        (33, Some(0x02 | 0x03)) => &pubkey[1..],
        (33, _) => return Err(Error::InvalidPoint),
        (32, _) => pubkey,
        _ => return Err(Error::InvalidLength),
    };
    kaspa::encode(KASPA_HRP, 0, x_only)
}

/// Convenience: full pipeline from a secp256k1 private key to every
/// Base58-network legacy address plus the SegWit, Ethereum, Bitcoin Cash
/// and Kaspa forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedAddresses {
    pub bitcoin: String,
    pub litecoin: String,
    pub dogecoin: String,
    pub dash: String,
    pub bitcoin_segwit: String,
    pub litecoin_segwit: String,
    pub ethereum: EthereumAddress,
    pub bitcoin_cash: String,
    pub kaspa: String,
}

/// Resolve every secp256k1-based address for a private key.
pub fn resolve_secp256k1(privkey: &[u8]) -> Result<DerivedAddresses, Error> {
    let point = secp256k1::derive_pubkey(privkey)?;
    let compressed = point.compress();
    let uncompressed = point.uncompressed();
    Ok(DerivedAddresses {
        bitcoin: p2pkh(BITCOIN_P2PKH_VERSION, &compressed)?,
        litecoin: p2pkh(LITECOIN_P2PKH_VERSION, &compressed)?,
        dogecoin: p2pkh(DOGECOIN_P2PKH_VERSION, &compressed)?,
        dash: p2pkh(DASH_P2PKH_VERSION, &compressed)?,
        bitcoin_segwit: segwit(BITCOIN_HRP, &compressed)?,
        litecoin_segwit: segwit(LITECOIN_HRP, &compressed)?,
        ethereum: ethereum(&uncompressed)?,
        bitcoin_cash: cashaddr_from_legacy(&p2pkh(BITCOIN_P2PKH_VERSION, &compressed)?)?,
        kaspa: kaspa(&compressed)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privkey_one() -> [u8; 32] {
        let mut pk = [0u8; 32];
        pk[31] = 1;
        pk
    }

    #[test]
    fn all_networks_for_privkey_one() {
        let derived = resolve_secp256k1(&privkey_one()).unwrap();
        assert_eq!(derived.bitcoin, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(derived.litecoin, "LVuDpNCSSj6pQ7t9Pv6d6sUkLKoqDEVUnJ");
        assert_eq!(derived.dogecoin, "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE");
        assert_eq!(derived.dash, "XmN7PQYWKn5MJFna5fRYgP6mxT2F7xpekE");
        assert_eq!(
            derived.bitcoin_segwit,
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        assert_eq!(
            derived.litecoin_segwit,
            "ltc1qw508d6qejxtdg4y5r3zarvary0c5xw7kgmn4n9"
        );
        assert_eq!(
            derived.ethereum.hex_lower,
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert_eq!(
            derived.ethereum.eip55,
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
        assert_eq!(
            derived.bitcoin_cash,
            "bitcoincash:qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h"
        );
        assert_eq!(
            derived.kaspa,
            "kaspa:q0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vq0mywgqyp"
        );
    }

    #[test]
    fn ethereum_from_decompressed_pubkey() {
        let compressed =
            hex::decode("03c026c4b041059c84a187252682b6f80cbbe64eb81497111ab6914b050a8936fd")
                .unwrap();
        let expanded = secp256k1::expand_pubkey(&compressed).unwrap();
        let address = ethereum(&expanded).unwrap();
        assert_eq!(address.eip55, "0x2161DedC3Be05B7Bb5aa16154BcbD254E9e9eb68");
    }

    #[test]
    fn eip55_reference_vectors() {
        for addr in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            assert_eq!(to_eip55(&addr.to_ascii_lowercase()).unwrap(), addr);
            // Idempotent over its own output, regardless of input casing.
            assert_eq!(to_eip55(addr).unwrap(), addr);
        }
        assert_eq!(to_eip55("0x1234"), Err(Error::InvalidHex));
        assert_eq!(to_eip55(&"g".repeat(40)), Err(Error::InvalidHex));
    }

    #[test]
    fn cashaddr_conversion_reference() {
        assert_eq!(
            cashaddr_from_legacy("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu").unwrap(),
            "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a"
        );
        assert_eq!(
            cashaddr_from_legacy("16w1D5WRVKJuZUsSRzdLp9w3YGcgoxDXb").unwrap(),
            "bitcoincash:qqq3728yw0y47sqn6l2na30mcw6zm78dzqre909m2r"
        );
    }

    #[test]
    fn pubkey_shape_is_enforced() {
        assert_eq!(p2pkh(0, &[0u8; 30]), Err(Error::InvalidLength));
        let mut bad = [0u8; 33];
        bad[0] = 0x05;
        assert_eq!(p2pkh(0, &bad), Err(Error::InvalidPoint));
        assert_eq!(ethereum(&[0u8; 63]), Err(Error::InvalidLength));
        assert_eq!(kaspa(&[0u8; 31]), Err(Error::InvalidLength));
    }

    #[test]
    fn uncompressed_key_changes_the_hash() {
        let point = secp256k1::derive_pubkey(&privkey_one()).unwrap();
        let compressed_addr = p2pkh(0, &point.compress()).unwrap();
        let uncompressed_addr = p2pkh(0, &point.uncompressed()).unwrap();
        assert_ne!(compressed_addr, uncompressed_addr);
        // The uncompressed form is the original 2009-era address.
        assert_eq!(uncompressed_addr, "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
    }
}
