//! Credential store
//!
//! The factory tying together the flat key-value file, the identity cache
//! and the crypto provider. Callers ask for an identity by name and
//! organization; the store answers from cache or constructs, persists and
//! caches a new one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::crypto::{CryptoError, CryptoProvider};
use crate::identity::cache::IdentityCache;
use crate::identity::enrollment::Enrollment;
use crate::identity::user::Identity;
use crate::kvstore::FlatKvStore;

/// Errors from identity construction and persisted state.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Reading a key or certificate file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Decoding or re-encoding the private key failed
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Persisted identity state could not be encoded or decoded
    #[error("Identity state error: {0}")]
    State(String),
}

/// Local credential store: flat-file persistence plus identity cache.
///
/// Single-threaded by design; nothing in here locks. Wrap the store
/// externally to share it across threads.
pub struct CredentialStore {
    kv: Arc<FlatKvStore>,
    cache: IdentityCache,
    provider: CryptoProvider,
}

impl CredentialStore {
    /// Open a store over the given property file with an injected provider.
    pub fn new(file: impl Into<PathBuf>, provider: CryptoProvider) -> Self {
        CredentialStore {
            kv: Arc::new(FlatKvStore::new(file)),
            cache: IdentityCache::new(),
            provider,
        }
    }

    /// The underlying flat key-value store.
    pub fn kv(&self) -> &Arc<FlatKvStore> {
        &self.kv
    }

    /// Cached identities.
    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Value stored under `key` in the property file.
    pub fn get_value(&self, key: &str) -> Option<String> {
        self.kv.get(key)
    }

    /// Best-effort write into the property file.
    pub fn set_value(&self, key: &str, value: &str) {
        self.kv.set(key, value)
    }

    /// Cached identity for the pair, or a fresh enrollment-less one.
    ///
    /// A miss constructs, caches and returns a new empty identity. No
    /// attempt is made to reload persisted state here;
    /// [`Identity::restore_state`] is the application's explicit opt-in for
    /// that.
    pub fn get_or_create(&mut self, name: &str, organization: &str) -> Arc<Identity> {
        if let Some(identity) = self.cache.get(name, organization) {
            return identity;
        }
        debug!("identity cache miss for {}.{}", name, organization);

        let identity = Arc::new(Identity::new(name, organization, Arc::clone(&self.kv)));
        self.cache.put(name, organization, Arc::clone(&identity));
        identity
    }

    /// Cached identity for the pair, or one enrolled from key and
    /// certificate files.
    ///
    /// On a cache hit the file arguments are ignored entirely and the cached
    /// instance is returned as-is; retrieval is idempotent by contract. On a
    /// miss the certificate file is read verbatim as UTF-8 text, the key
    /// file is decoded as a PEM private key, and the resulting identity is
    /// persisted and cached. File and decode failures propagate unwrapped
    /// and leave the cache untouched.
    pub fn get_or_create_from_files(
        &mut self,
        name: &str,
        organization: &str,
        msp_id: &str,
        private_key_file: &Path,
        certificate_file: &Path,
    ) -> Result<Arc<Identity>, IdentityError> {
        if let Some(identity) = self.cache.get(name, organization) {
            return Ok(identity);
        }

        let certificate = fs::read_to_string(certificate_file)?;
        let key_bytes = fs::read(private_key_file)?;
        let key = self.provider.decode_private_key(&key_bytes)?;

        let mut identity = Identity::new(name, organization, Arc::clone(&self.kv));
        identity.set_msp_id(msp_id);
        identity.set_enrollment(Enrollment::new(key, certificate));
        identity.save_state()?;

        let identity = Arc::new(identity);
        self.cache.put(name, organization, Arc::clone(&identity));
        info!("enrolled {}.{} for msp {}", name, organization, msp_id);
        Ok(identity)
    }
}
