//! In-memory identity cache
//!
//! A plain owned map from composite key to identity. No eviction, no
//! capacity bound, no expiry and no internal locking; entries live as long
//! as the cache does.

use std::collections::HashMap;
use std::sync::Arc;

use crate::identity::user::{CompositeKey, Identity};

/// Identity cache keyed by `(name, organization)`.
#[derive(Default)]
pub struct IdentityCache {
    entries: HashMap<CompositeKey, Arc<Identity>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        IdentityCache {
            entries: HashMap::new(),
        }
    }

    /// Look up a cached identity. Pure; touches no disk.
    pub fn get(&self, name: &str, organization: &str) -> Option<Arc<Identity>> {
        self.entries
            .get(&Identity::composite_key(name, organization))
            .cloned()
    }

    /// Insert or overwrite. No merge semantics.
    pub fn put(&mut self, name: &str, organization: &str, identity: Arc<Identity>) {
        self.entries
            .insert(Identity::composite_key(name, organization), identity);
    }

    /// True when an entry exists for the pair.
    pub fn contains(&self, name: &str, organization: &str) -> bool {
        self.entries
            .contains_key(&Identity::composite_key(name, organization))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
