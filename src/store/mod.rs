//! Task persistence store

use crate::storage::StorageBackend;
use crate::task::filter::{TaskFilter, TaskStats};
use crate::task::{NewTask, Task, TaskPatch};
use std::sync::Arc;
use tracing::{debug, error};

/// Storage key the collection lives under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "todoList-app-todos";

/// Task store that reads and writes the whole collection under one key.
///
/// Every operation loads the full collection, works on it in memory and, if
/// it changed anything, writes the full collection back. Storage faults never
/// reach the caller: a failed read looks like an empty list and a failed
/// write is only logged.
pub struct TaskStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl TaskStore {
    /// Create a store over `backend` using the default key
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a store over `backend` using a custom key
    pub fn with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Open the backend described by `config`
    pub fn from_config(config: &crate::Config) -> crate::Result<Self> {
        let backend = config.build_backend()?;
        Ok(Self::with_key(backend, config.storage_key.clone()))
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and parse the stored collection, surfacing faults
    pub fn try_load_all(&self) -> crate::Result<Vec<Task>> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load every task in store order.
    ///
    /// Unreadable or corrupt data is logged and reported as an empty list.
    pub fn load_all(&self) -> Vec<Task> {
        match self.try_load_all() {
            Ok(tasks) => tasks,
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to load tasks, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored collection with `tasks`.
    ///
    /// Returns `false` when the write failed; the failure is logged, not raised.
    pub fn save_all(&self, tasks: &[Task]) -> bool {
        let result = serde_json::to_string(tasks)
            .map_err(crate::TodoStoreError::from)
            .and_then(|raw| self.backend.set(&self.key, &raw));

        match result {
            Ok(()) => {
                debug!("Saved {} tasks under {}", tasks.len(), self.key);
                true
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to save tasks");
                false
            }
        }
    }

    /// Create a task and append it to the end of the collection
    pub fn create(&self, input: NewTask) -> Task {
        let task = Task::new(input);

        let mut tasks = self.load_all();
        tasks.push(task.clone());
        self.save_all(&tasks);

        debug!("Task {} created with priority {}", task.id, task.priority);
        task
    }

    /// Find a task by id
    pub fn get_by_id(&self, id: &str) -> Option<Task> {
        self.load_all().into_iter().find(|t| t.id == id)
    }

    /// Merge `patch` into the task with `id`.
    ///
    /// `updated_at` is refreshed even if no field changes. Returns `None`
    /// without writing when the id is unknown.
    pub fn update(&self, id: &str, patch: TaskPatch) -> Option<Task> {
        let mut tasks = self.load_all();
        let task = tasks.iter_mut().find(|t| t.id == id)?;

        task.apply(patch);
        let updated = task.clone();
        self.save_all(&tasks);

        debug!("Task {} updated", id);
        Some(updated)
    }

    /// Remove the task with `id`; `false` if there was none
    pub fn delete_by_id(&self, id: &str) -> bool {
        let mut tasks = self.load_all();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() == before {
            return false;
        }

        self.save_all(&tasks);
        debug!("Task {} deleted", id);
        true
    }

    /// Flip the completion state of the task with `id`
    pub fn toggle_complete(&self, id: &str) -> Option<Task> {
        let task = self.get_by_id(id)?;
        self.update(id, TaskPatch::new().completed(!task.completed))
    }

    /// Remove every completed task, returning how many were removed
    pub fn delete_completed(&self) -> usize {
        let tasks = self.load_all();
        let before = tasks.len();
        let remaining: Vec<Task> = tasks.into_iter().filter(|t| !t.completed).collect();
        let removed = before - remaining.len();

        self.save_all(&remaining);
        debug!("Deleted {} completed tasks", removed);
        removed
    }

    /// Load the tasks matching `filter`, in store order
    pub fn list(&self, filter: TaskFilter) -> Vec<Task> {
        filter.apply(self.load_all())
    }

    /// Count tasks by completion state
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.load_all())
    }

    /// Drop the stored collection entirely
    pub fn clear(&self) -> bool {
        match self.backend.remove(&self.key) {
            Ok(()) => {
                debug!("Cleared {}", self.key);
                true
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to clear tasks");
                false
            }
        }
    }

    /// Check if the underlying storage is healthy
    pub fn health_check(&self) -> bool {
        self.backend.health_check()
    }
}
