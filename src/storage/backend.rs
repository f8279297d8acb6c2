//! Backend

use crate::storage::StorageBackend;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory storage backend implementation
#[derive(Clone)]
pub struct MemoryBackend {
    storage: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes: None,
        }
    }

    /// Create a backend that rejects writes once keys and values together
    /// would exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::new()
        }
    }

    /// Total bytes currently held, keys included
    pub fn used_bytes(&self) -> usize {
        let storage = self.storage.read();
        storage.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Check whether no key is held
    pub fn is_empty(&self) -> bool {
        self.storage.read().is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let storage = self.storage.read();
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> crate::Result<()> {
        let mut storage = self.storage.write();

        if let Some(limit) = self.quota_bytes {
            let others: usize = storage
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > limit {
                return Err(crate::TodoStoreError::QuotaExceeded { limit, requested });
            }
        }

        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> crate::Result<()> {
        let mut storage = self.storage.write();
        storage.remove(key);
        Ok(())
    }

    fn health_check(&self) -> bool {
        true
    }
}
