/// Filters, counts and display ordering over task lists
pub mod filter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Priority levels for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Lowercase name, identical to the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A single to-do item as persisted in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier, never changes after creation
    pub id: String,

    /// Display title
    pub title: String,

    /// Free-form description, may be empty
    pub description: String,

    /// Whether the task is done
    pub completed: bool,

    /// Task priority
    pub priority: Priority,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task; id and timestamps are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Display title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Initial completion state
    pub completed: bool,

    /// Task priority
    pub priority: Priority,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New completion state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    /// New priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Task {
    /// Build a task from creation input, stamping a fresh id and timestamps
    pub fn new(input: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            completed: input.completed,
            priority: input.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields and refresh `updated_at`, even for an empty patch
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.touch();
    }

    /// Refresh `updated_at`; never earlier than `created_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

impl NewTask {
    /// Create input with the form defaults: empty description, not completed, medium priority
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
            priority: Priority::default(),
        }
    }

    /// Set the description (chainable)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority (chainable)
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the initial completion state (chainable)
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl TaskPatch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the completion state
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replace the priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task::new(NewTask::new("Buy milk").with_priority(Priority::High));
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["priority"], "high");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let result: Result<Priority, _> = serde_json::from_str("\"urgent\"");
        assert!(result.is_err());
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
    }
}
