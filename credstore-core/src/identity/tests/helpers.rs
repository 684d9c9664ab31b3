//! Test fixtures
//!
//! Key material is produced by the same crates that decode it, so the
//! fixtures stay self-consistent without checked-in key blobs.

use pkcs8::{EncodePrivateKey, LineEnding};

/// Arbitrary PEM-looking certificate text; this layer never parses it.
pub const CERT_TEXT: &str = "-----BEGIN CERTIFICATE-----\n\
MIICGTCCAb+gAwIBAgIQNotACertJustTestBytes0DAKBggqhkjOPQQDAjBzMQsw\n\
-----END CERTIFICATE-----\n";

/// Deterministic P-256 key, PKCS#8 PEM.
pub fn p256_key_pem() -> String {
    let secret = p256::SecretKey::from_slice(&[7u8; 32]).unwrap();
    secret.to_pkcs8_pem(LineEnding::LF).unwrap().as_str().to_owned()
}

/// Deterministic Ed25519 key, PKCS#8 PEM.
pub fn ed25519_key_pem() -> String {
    ed25519_dalek::pkcs8::KeypairBytes {
        secret_key: [42u8; 32],
        public_key: None,
    }
    .to_pkcs8_pem(LineEnding::LF)
    .unwrap()
    .as_str()
    .to_owned()
}
