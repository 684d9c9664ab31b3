//! Crypto error types

use thiserror::Error;

/// Errors from private-key decoding and use.
///
/// All of these are fatal to the calling operation and propagate to the
/// caller unmodified; nothing in this layer retries or degrades.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Input held no parseable PEM block
    #[error("Invalid PEM input: {0}")]
    InvalidPem(String),

    /// The PEM block holds something other than private-key material
    #[error("Expected private-key material, found \"{0}\" block")]
    TypeMismatch(String),

    /// Key algorithm not supported by this provider
    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The key encoding inside the PEM block is malformed
    #[error("Malformed key encoding: {0}")]
    MalformedKey(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The key could not be re-encoded for persistence
    #[error("Key encoding failed: {0}")]
    Encoding(String),
}
