//! Identity entity and its persisted state
//!
//! An identity is created empty, optionally decorated with an MSP id and an
//! enrollment, and serializes itself into the flat key-value store under the
//! `user.<name>.<organization>` property.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::CryptoProvider;
use crate::identity::enrollment::Enrollment;
use crate::identity::store::IdentityError;
use crate::kvstore::FlatKvStore;

/// Value-typed cache key derived from a name/organization pair.
///
/// Rendered as `name.organization` in the property file. Kept as a struct so
/// that no two name/organization pairs can collide, names containing `.`
/// included; the concatenated form is only a rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    name: String,
    organization: String,
}

impl CompositeKey {
    pub fn new(name: impl Into<String>, organization: impl Into<String>) -> Self {
        CompositeKey {
            name: name.into(),
            organization: organization.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.organization)
    }
}

/// Identity state as stored in the property file, JSON-encoded.
#[derive(Serialize, Deserialize)]
struct PersistedState {
    msp_id: Option<String>,
    certificate: Option<String>,
    private_key_pem: Option<String>,
}

/// A user identity scoped to one organization.
///
/// Constructed empty, then optionally given an MSP id and an enrollment.
/// Once handed out by the credential store it is shared read-only; all
/// decoration happens before caching.
#[derive(Debug)]
pub struct Identity {
    name: String,
    organization: String,
    msp_id: Option<String>,
    enrollment: Option<Enrollment>,
    store: Arc<FlatKvStore>,
}

impl Identity {
    /// Create an empty identity bound to the given store.
    pub fn new(
        name: impl Into<String>,
        organization: impl Into<String>,
        store: Arc<FlatKvStore>,
    ) -> Self {
        Identity {
            name: name.into(),
            organization: organization.into(),
            msp_id: None,
            enrollment: None,
            store,
        }
    }

    /// Cache and property key for a name/organization pair.
    pub fn composite_key(name: &str, organization: &str) -> CompositeKey {
        CompositeKey::new(name, organization)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Membership-service-provider id, if set.
    pub fn msp_id(&self) -> Option<&str> {
        self.msp_id.as_deref()
    }

    pub fn enrollment(&self) -> Option<&Enrollment> {
        self.enrollment.as_ref()
    }

    /// Set the membership-service-provider id scoping this identity.
    pub fn set_msp_id(&mut self, msp_id: impl Into<String>) {
        self.msp_id = Some(msp_id.into());
    }

    /// Attach an enrollment.
    pub fn set_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollment = Some(enrollment);
    }

    fn state_key(&self) -> String {
        format!(
            "user.{}",
            Identity::composite_key(&self.name, &self.organization)
        )
    }

    /// Serialize this identity into the key-value store.
    ///
    /// The enrollment key is re-armored as PKCS#8 PEM; the write itself is
    /// the store's best-effort write. Re-encoding failures propagate.
    pub fn save_state(&self) -> Result<(), IdentityError> {
        let state = PersistedState {
            msp_id: self.msp_id.clone(),
            certificate: self.enrollment.as_ref().map(|e| e.cert().to_string()),
            private_key_pem: self
                .enrollment
                .as_ref()
                .map(|e| e.key().to_pkcs8_pem())
                .transpose()?,
        };
        let encoded =
            serde_json::to_string(&state).map_err(|e| IdentityError::State(e.to_string()))?;
        self.store.set(&self.state_key(), &encoded);
        debug!("saved state for {}", self.state_key());
        Ok(())
    }

    /// Reload previously saved state, if any.
    ///
    /// Returns `Ok(true)` when saved state was found and applied. The
    /// credential store never calls this on an identity's behalf;
    /// applications opt in explicitly.
    pub fn restore_state(&mut self, provider: &CryptoProvider) -> Result<bool, IdentityError> {
        let Some(encoded) = self.store.get(&self.state_key()) else {
            return Ok(false);
        };
        let state: PersistedState =
            serde_json::from_str(&encoded).map_err(|e| IdentityError::State(e.to_string()))?;

        if let Some(msp_id) = state.msp_id {
            self.msp_id = Some(msp_id);
        }
        if let (Some(certificate), Some(pem)) = (state.certificate, state.private_key_pem) {
            let key = provider.decode_private_key(pem.as_bytes())?;
            self.enrollment = Some(Enrollment::new(key, certificate));
        }
        Ok(true)
    }
}
