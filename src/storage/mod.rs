/// In-memory backend
pub mod backend;
/// File-per-key backend
pub mod file;

/// Trait for key-value storage backends.
///
/// A backend holds opaque string values under string keys. The task store
/// keeps its entire collection under one key.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written
    fn get(&self, key: &str) -> crate::Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> crate::Result<()>;

    /// Remove `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> crate::Result<()>;

    /// Check if storage is healthy
    fn health_check(&self) -> bool;
}
