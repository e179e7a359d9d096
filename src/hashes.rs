//! Digest primitives used by the derivation and encoding pipelines.
//!
//! Thin byte-in/byte-out wrappers so the rest of the crate never touches
//! hasher state directly.

use blake2::digest::{Update as Blake2Update, VariableOutput};
use blake2::Blake2bVar;
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

use crate::error::Error;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(data));
    out
}

/// Keccak-256 with the original 0x01 padding, as used by Ethereum.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Blake2b with a caller-chosen digest length of 1..=64 bytes.
pub fn blake2b(data: &[u8], out_len: usize) -> Result<Vec<u8>, Error> {
    let mut hasher = Blake2bVar::new(out_len).map_err(|_| Error::InvalidLength)?;
    hasher.update(data);
    let mut out = vec![0u8; out_len];
    hasher
        .finalize_variable(&mut out)
        .map_err(|_| Error::InvalidLength)?;
    Ok(out)
}

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let digest = blake2b(data, 32).expect("32 is a valid blake2b digest size");
    out.copy_from_slice(&digest);
    out
}

pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    let digest = blake2b(data, 64).expect("64 is a valid blake2b digest size");
    out.copy_from_slice(&digest);
    out
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    Mac::update(&mut mac, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac =
        Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
    Mac::update(&mut mac, data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Hash160 = RIPEMD160(SHA256(data)), the Bitcoin pubkey-hash chain.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
