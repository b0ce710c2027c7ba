// store/mod.rs: the in-memory task store.
//
// Owns the task collection and the monotonic id counter. All validation of
// create/update payloads lives here; the REST layer only translates the
// typed failures into HTTP responses.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::RwLock;

/// A single task record.
///
/// `id` and `created_at` are fixed at creation; the other fields are mutable
/// through [`TaskStore::update`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Creation time in UTC, serialized as RFC 3339 with a trailing `Z`.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a task. Only `title` is required to be present and
/// non-empty; the rest fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Payload for updating a task. Absent fields are left untouched.
///
/// `completed` is carried as a raw JSON value so that a present but
/// non-boolean value reaches the store and fails with the contractual
/// message instead of dying at the serde boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<Value>,
}

/// Failures surfaced by the store. The `Display` strings are the exact
/// messages echoed on the wire.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Task not found")]
    NotFound { id: u64 },
    #[error("Request body is required")]
    BodyRequired,
    #[error("Title is required")]
    TitleRequired,
    #[error("Title cannot be empty")]
    TitleEmpty,
    #[error("Completed must be a boolean")]
    CompletedNotBoolean,
}

struct StoreInner {
    tasks: Vec<Task>,
    /// Next id to hand out. Monotonic; never rewinds, even after deletes.
    next_id: u64,
}

/// In-memory task collection guarded by a single lock.
///
/// The counter and the collection are one unit of shared state, so every
/// mutating operation takes the write lock for its full duration.
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl TaskStore {
    /// Create a store pre-populated with the two seed tasks; the id counter
    /// starts at 3.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: seed_tasks(),
                next_id: 3,
            }),
        }
    }

    /// All tasks in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.inner.read().unwrap().tasks.clone()
    }

    /// Number of active tasks.
    pub fn count(&self) -> usize {
        self.inner.read().unwrap().tasks.len()
    }

    /// Look up a task by id.
    pub fn get(&self, id: u64) -> Result<Task, StoreError> {
        self.inner
            .read()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    /// Validate a draft and append a new task.
    pub fn create(&self, draft: Option<TaskDraft>) -> Result<Task, StoreError> {
        let draft = draft.ok_or(StoreError::BodyRequired)?;
        let title = match draft.title {
            Some(t) if !t.is_empty() => t,
            _ => return Err(StoreError::TitleRequired),
        };

        let mut inner = self.inner.write().unwrap();
        let task = Task {
            id: inner.next_id,
            title,
            description: draft.description.unwrap_or_default(),
            completed: draft.completed.unwrap_or(false),
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    /// Apply a patch to an existing task.
    ///
    /// The not-found check runs before any body or field validation. Fields
    /// are applied in declaration order, in place: a failing `completed`
    /// does not roll back a `title` or `description` already applied in the
    /// same call.
    pub fn update(&self, id: u64, patch: Option<TaskPatch>) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound { id })?;
        let patch = patch.ok_or(StoreError::BodyRequired)?;

        if let Some(title) = patch.title {
            if title.is_empty() {
                return Err(StoreError::TitleEmpty);
            }
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            match completed {
                Value::Bool(value) => task.completed = value,
                _ => return Err(StoreError::CompletedNotBoolean),
            }
        }
        Ok(task.clone())
    }

    /// Remove a task by id.
    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Setup CI/CD Pipeline".to_string(),
            description: "Configure GitHub Actions".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        },
        Task {
            id: 2,
            title: "Write Unit Tests".to_string(),
            description: "Create comprehensive test suite".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap(),
        },
    ]
}
