//! # chain-address
//!
//! Key derivation and address encoding for cryptocurrency wallets,
//! built from raw primitives: two curve engines and the family of address
//! codecs they feed.
//!
//! | Key type | Chain | Method |
//! |----------|-------|--------|
//! | secp256k1 | Bitcoin, Litecoin, Dogecoin, Dash | Base58Check over `version || hash160(pub)` |
//! | secp256k1 | Bitcoin, Litecoin (SegWit) | Bech32 witness program |
//! | secp256k1 | Ethereum | Keccak-256 of the uncompressed key, EIP-55 cased |
//! | secp256k1 | Bitcoin Cash | CashAddr re-encoding of the legacy hash |
//! | secp256k1 | Kaspa | x-only key under the Kaspa Bech32 variant |
//! | Ed25519 (SHA-512) | Nimiq | Blake2b-160 hash, IBAN-checksummed Base32 |
//! | Ed25519 (Blake2b) | Nano | key + reversed Blake2b-5 checksum in Base32 |
//!
//! Everything is pure and synchronous: each operation consumes its inputs
//! and returns a value or exactly one [`Error`] kind. There is no I/O, no
//! shared state, and no signing: only derivation and encoding.
//!
//! # Example
//!
//! ```
//! use chain_address::{address, secp256k1};
//!
//! let privkey = hex::decode(
//!     "0000000000000000000000000000000000000000000000000000000000000001",
//! ).unwrap();
//! let point = secp256k1::derive_pubkey(&privkey).unwrap();
//! let btc = address::p2pkh(address::BITCOIN_P2PKH_VERSION, &point.compress()).unwrap();
//! assert_eq!(btc, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
//! ```

pub mod address;
pub mod base58;
pub mod bech32;
pub mod cashaddr;
pub mod ed25519;
pub mod error;
pub mod field;
pub mod hashes;
pub mod kaspa;
pub mod nano;
pub mod nimiq;
pub mod secp256k1;
pub mod selftest;
pub mod words;

pub use address::{
    cashaddr_from_legacy, ethereum, p2pkh, resolve_secp256k1, segwit, to_eip55,
    DerivedAddresses, EthereumAddress,
};
pub use base58::wif_encode;
pub use error::Error;

/// Parse a lowercase hex string into bytes.
///
/// Key material enters the crate through this gate: odd length, non-hex
/// characters, and upper-case digits are all rejected as
/// [`Error::InvalidHex`]. Callers holding upper- or mixed-case input must
/// lower-case it explicitly first.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, Error> {
    if s.len() % 2 != 0 {
        return Err(Error::InvalidHex);
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(Error::InvalidHex);
    }
    hex::decode(s).map_err(|_| Error::InvalidHex)
}

/// [`parse_hex`] for the ubiquitous 32-byte case (keys and seeds).
pub fn parse_hex32(s: &str) -> Result<[u8; 32], Error> {
    let bytes = parse_hex(s)?;
    let mut out = [0u8; 32];
    if bytes.len() != 32 {
        return Err(Error::InvalidLength);
    }
    out.copy_from_slice(&bytes);
    Ok(out)
}
