//! Configuration

use crate::storage::backend::MemoryBackend;
use crate::storage::file::FileBackend;
use crate::store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for the todo store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage backend type
    pub storage_backend: StorageBackend,

    /// Directory used by the file backend
    pub storage_dir: PathBuf,

    /// Key the task collection is stored under
    pub storage_key: String,

    /// Optional byte quota; only valid with the memory backend
    pub quota_bytes: Option<usize>,

    /// Log level for the binary's subscriber
    pub log_level: String,
}

/// Storage backend types supported by the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory storage (non-persistent)
    Memory,
    /// One JSON file per key under `storage_dir`
    File,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::File,
            storage_dir: PathBuf::from(".todo-store"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a file-backed configuration rooted at `storage_dir`
    pub fn file(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_backend: StorageBackend::File,
            storage_dir: storage_dir.into(),
            ..Default::default()
        }
    }

    /// Load configuration from file, environment variables, or defaults
    pub fn load() -> crate::Result<Self> {
        if let Ok(config_path) = env::var("TODO_STORE_CONFIG") {
            info!("Loading config from TODO_STORE_CONFIG: {}", config_path);
            return Self::from_file(&config_path);
        }

        let default_paths = [
            "todo-store.yaml",
            "todo-store.toml",
            "config/todo-store.yaml",
            "config/todo-store.toml",
        ];

        for path in default_paths {
            if Path::new(path).exists() {
                info!("Loading config from: {}", path);
                return Self::from_file(path);
            }
        }

        if let Some(config) = Self::from_env()? {
            info!("Loaded config from environment variables");
            return Ok(config);
        }

        warn!("No config file or environment variables found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| {
                crate::TodoStoreError::ConfigError(format!("Failed to load config file: {}", e))
            })?;

        let config: Config = settings.try_deserialize().map_err(|e| {
            crate::TodoStoreError::ConfigError(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when no `TODO_STORE_*` variable is set; a variable
    /// that is set but invalid is an error.
    pub fn from_env() -> crate::Result<Option<Self>> {
        let mut config = Self::default();
        let mut found_any = false;

        if let Ok(val) = env::var("TODO_STORE_STORAGE_BACKEND") {
            config.storage_backend = match val.to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                _ => {
                    return Err(crate::TodoStoreError::ConfigError(format!(
                        "Invalid STORAGE_BACKEND: {}",
                        val
                    )))
                }
            };
            found_any = true;
        }

        if let Ok(val) = env::var("TODO_STORE_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(val);
            found_any = true;
        }

        if let Ok(val) = env::var("TODO_STORE_STORAGE_KEY") {
            config.storage_key = val;
            found_any = true;
        }

        if let Ok(val) = env::var("TODO_STORE_QUOTA_BYTES") {
            config.quota_bytes = Some(val.parse().map_err(|e| {
                crate::TodoStoreError::ConfigError(format!("Invalid QUOTA_BYTES: {}", e))
            })?);
            found_any = true;
        }

        if let Ok(val) = env::var("TODO_STORE_LOG_LEVEL") {
            config.log_level = val.to_lowercase();
            found_any = true;
        }

        if !found_any {
            return Ok(None);
        }

        config.validate()?;
        Ok(Some(config))
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(crate::TodoStoreError::ConfigError(
                "Storage key must not be empty".to_string(),
            ));
        }

        if self.storage_key.contains(['/', '\\']) || self.storage_key.contains("..") {
            return Err(crate::TodoStoreError::ConfigError(format!(
                "Storage key must not contain path separators: {}",
                self.storage_key
            )));
        }

        if self.quota_bytes.is_some() && self.storage_backend != StorageBackend::Memory {
            return Err(crate::TodoStoreError::ConfigError(
                "Quota is only supported by the memory backend".to_string(),
            ));
        }

        if self.quota_bytes == Some(0) {
            return Err(crate::TodoStoreError::ConfigError(
                "Quota must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(crate::TodoStoreError::ConfigError(format!(
                "Invalid log level: {}",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Construct the configured storage backend
    pub fn build_backend(&self) -> crate::Result<Arc<dyn crate::storage::StorageBackend>> {
        let backend: Arc<dyn crate::storage::StorageBackend> = match self.storage_backend {
            StorageBackend::Memory => match self.quota_bytes {
                Some(quota) => Arc::new(MemoryBackend::with_quota(quota)),
                None => Arc::new(MemoryBackend::new()),
            },
            StorageBackend::File => Arc::new(FileBackend::new(&self.storage_dir)?),
        };
        Ok(backend)
    }
}
