//! Local, durable credential store for a blockchain-client identity layer.
//!
//! Persists flat `key=value` configuration data to a property file and keeps
//! an in-memory cache of user identities, each pairing a decoded private key
//! with a certificate. Callers request an identity by name and organization;
//! the store answers from cache or constructs one from PEM-encoded key and
//! certificate files, persists it and caches it.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod kvstore;
pub mod logging;

pub use config::Config;
pub use crypto::{CryptoError, CryptoProvider, KeyAlgorithm, PrivateKey};
pub use identity::{
    CompositeKey, CredentialStore, Enrollment, Identity, IdentityCache, IdentityError,
};
pub use kvstore::FlatKvStore;
pub use logging::{init_logging, LogLevel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Ensure the main exports are accessible
        let _ = LogLevel::Info;
        let _ = CryptoProvider::new();
    }
}
