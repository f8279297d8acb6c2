//! File-per-key storage backend

use crate::storage::StorageBackend;
use crate::TodoStoreError;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores each key as `<directory>/<key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so readers see either the old or the new collection.
#[derive(Debug, Clone)]
pub struct FileBackend {
    directory: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `directory`, creating it if needed
    pub fn new(directory: impl Into<PathBuf>) -> crate::Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            TodoStoreError::StorageUnavailable(format!(
                "failed to create {}: {}",
                directory.display(),
                e
            ))
        })?;
        info!(directory = %directory.display(), "Opened file storage backend");
        Ok(Self { directory })
    }

    /// Root directory of this backend
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn key_path(&self, key: &str) -> crate::Result<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
            || key.contains('\0')
        {
            return Err(TodoStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.directory.join(format!("{}.json", key)))
    }
}

fn unavailable(action: &str, path: &Path, err: std::io::Error) -> TodoStoreError {
    TodoStoreError::StorageUnavailable(format!("failed to {} {}: {}", action, path.display(), err))
}

fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable("read", &path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> crate::Result<()> {
        let path = self.key_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        write_synced(&temp_path, value).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            unavailable("write", &temp_path, e)
        })?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(unavailable("replace", &path, e));
        }

        debug!(key = %key, path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&self, key: &str) -> crate::Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key = %key, "Removed storage key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(unavailable("remove", &path, e)),
        }
    }

    fn health_check(&self) -> bool {
        self.directory.is_dir()
    }
}
