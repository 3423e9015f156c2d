//! In-memory key store keyed by caller-chosen key name.
//!
//! Keys are created lazily on first request and live until deleted or the
//! process exits. The map sits behind a single reader/writer lock: lookups
//! and snapshots share it, inserts and deletes take it exclusively.
//! Generation happens outside the lock so a slow RSA prime search for one
//! name never stalls readers; when two callers race on the same absent
//! name, the first insert wins and the loser's key is discarded.

use crate::error::MockJwtError;
use crate::keys::algorithm::SigningAlgorithm;
use crate::keys::generator::{self, KeyMaterial};
use crate::metrics;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A stored key: its name, the algorithm it was generated for, and the
/// material itself. Never mutated after creation.
#[derive(Debug)]
pub struct KeyEntry {
    name: String,
    algorithm: SigningAlgorithm,
    material: KeyMaterial,
}

impl KeyEntry {
    /// Key name, also used as the JWK `kid`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Algorithm the key was generated for.
    #[must_use]
    pub const fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Generated key material.
    #[must_use]
    pub const fn material(&self) -> &KeyMaterial {
        &self.material
    }
}

/// Shared handle to a stored key.
pub type KeyHandle = Arc<KeyEntry>;

/// Thread-safe name → key mapping.
#[derive(Debug, Default)]
pub struct KeyStore {
    keys: RwLock<BTreeMap<String, KeyHandle>>,
}

impl KeyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the key stored under `name`, generating one for `alg` if absent.
    ///
    /// An existing key is returned as-is even when `alg` differs from the
    /// algorithm it was generated for.
    ///
    /// # Errors
    ///
    /// Returns [`MockJwtError::UnsupportedAlgorithm`] if `alg` does not parse,
    /// or [`MockJwtError::KeyGenerationFailed`]. The store is left untouched
    /// in both cases.
    pub fn get_or_create(&self, name: &str, alg: &str) -> Result<KeyHandle, MockJwtError> {
        let algorithm: SigningAlgorithm = alg.parse()?;
        self.get_or_create_with(name, algorithm)
    }

    /// Typed variant of [`KeyStore::get_or_create`].
    ///
    /// # Errors
    ///
    /// Returns [`MockJwtError::KeyGenerationFailed`] if generation fails.
    pub fn get_or_create_with(
        &self,
        name: &str,
        algorithm: SigningAlgorithm,
    ) -> Result<KeyHandle, MockJwtError> {
        if let Some(existing) = self.get(name) {
            return Ok(existing);
        }

        let started = Instant::now();
        let material = generator::generate(algorithm)?;
        let elapsed = started.elapsed().as_secs_f64();

        let candidate = Arc::new(KeyEntry {
            name: name.to_string(),
            algorithm,
            material,
        });

        let mut keys = self.keys.write();
        match keys.entry(name.to_string()) {
            Entry::Occupied(winner) => {
                debug!(key_name = %name, "Lost key generation race, discarding candidate");
                Ok(Arc::clone(winner.get()))
            }
            Entry::Vacant(slot) => {
                metrics::record_key_generated(algorithm.family(), elapsed);
                info!(
                    key_name = %name,
                    algorithm = %algorithm,
                    family = algorithm.family().as_str(),
                    "Generated signing key"
                );
                Ok(Arc::clone(slot.insert(candidate)))
            }
        }
    }

    /// Look up a key without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<KeyHandle> {
        self.keys.read().get(name).cloned()
    }

    /// Consistent snapshot of every stored key, ordered by name.
    #[must_use]
    pub fn get_all(&self) -> Vec<KeyHandle> {
        self.keys.read().values().cloned().collect()
    }

    /// Remove the key stored under `name`. Absent names are ignored.
    pub fn delete(&self, name: &str) {
        if self.keys.write().remove(name).is_some() {
            info!(key_name = %name, "Deleted signing key");
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}
