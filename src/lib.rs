//! Todo Store RS - whole-collection task list persistence
//!
//! This library keeps a personal task list as one serialized collection under
//! a single key of a pluggable key-value store, and exposes the create, read,
//! update and delete operations a UI layer drives synchronously.

/// Configuration management for the store
pub mod config;
/// Storage backend trait and implementations
pub mod storage;
/// The task persistence store
pub mod store;
/// Task definitions and list views
pub mod task;

pub use config::Config;
pub use storage::backend::MemoryBackend;
pub use storage::file::FileBackend;
pub use storage::StorageBackend;
pub use store::TaskStore;
pub use task::filter::{TaskFilter, TaskStats};
pub use task::{NewTask, Priority, Task, TaskPatch};

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, TodoStoreError>;

/// Error types for the todo store
#[derive(Error, Debug)]
pub enum TodoStoreError {
    /// Reading from or writing to the backing store failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The backing store refused a write because it would exceed its quota
    #[error("Storage quota exceeded: {requested} bytes requested, limit is {limit}")]
    QuotaExceeded {
        /// Configured quota in bytes
        limit: usize,
        /// Total size the write would have produced
        requested: usize,
    },

    /// Stored data could not be parsed back into tasks
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Storage key rejected by the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
