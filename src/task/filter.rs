//! List views over a loaded task collection

use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which tasks a list view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl TaskFilter {
    /// Check whether a task belongs to this view
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    /// Keep only matching tasks, preserving order
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "active" => Ok(TaskFilter::Active),
            "completed" => Ok(TaskFilter::Completed),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

/// Counts shown alongside the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// All tasks
    pub total: usize,
    /// Incomplete tasks
    pub active: usize,
    /// Completed tasks
    pub completed: usize,
}

impl TaskStats {
    /// Count tasks by completion state
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}

/// Reorder for display, most recently created first.
///
/// The store itself keeps insertion order; this is the view ordering.
pub fn newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
