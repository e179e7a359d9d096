//! Crate-wide error type.
//!
//! Every fallible operation returns exactly one of these kinds, so callers
//! can distinguish failure classes at the boundary without string matching.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Odd length, non-hex characters, or upper-case input where the API
    /// requires callers to lower-case first.
    #[error("invalid hex input")]
    InvalidHex,

    /// Scalar is zero or not below the curve order.
    #[error("scalar out of range for the curve")]
    InvalidScalar,

    /// Point decompression failed: bad prefix, no square root, or the
    /// coordinates do not satisfy the curve equation.
    #[error("invalid curve point")]
    InvalidPoint,

    /// Character outside the alphabet of a Base58- or Base32-family codec.
    #[error("character out of alphabet")]
    InvalidBase58,

    /// Base58Check, Bech32, CashAddr, Kaspa, IBAN-97 or Blake2b-5 checksum
    /// did not verify.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// Structural Bech32-family violation: mixed case, bad HRP, missing
    /// separator, oversized string, or non-zero padding bits on strict
    /// decode.
    #[error("malformed bech32 string")]
    InvalidBech32,

    /// Payload has the wrong size for the operation.
    #[error("payload of invalid length")]
    InvalidLength,

    /// Decimal amount string is malformed or has too many fractional digits.
    #[error("invalid decimal amount")]
    InvalidDecimal,
}
