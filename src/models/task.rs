use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A to-do item owned by exactly one principal.
///
/// `owner_id` is set at creation time and never changes afterwards; every
/// read or mutation of a task must first pass the ownership check against it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier, assigned by storage on insert.
    pub id: i32,
    /// Identifier of the owning principal. Immutable.
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input structure for creating a task.
///
/// The owner is never part of the payload; it is always forced to the
/// authenticated principal by the task service.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description. Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a task: one optional field per mutable attribute.
///
/// Only fields that are present are applied; absent fields leave the stored
/// value untouched. `owner_id` is deliberately not representable here.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub completed: Option<bool>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Sort orders accepted when listing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    /// Oldest first.
    Created,
    /// Lexicographic by title.
    Title,
    /// Earliest due date first; tasks without one sort last.
    DueDate,
}

/// Query parameters for listing tasks.
///
/// Listing is always scoped to the authenticated principal; without an
/// explicit sort, tasks come back most recently created first.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub sort: Option<TaskSort>,
}

impl Task {
    /// Creates a new `Task` from `TaskCreate` input, owned by `owner_id`.
    ///
    /// Both timestamps are set to the current time and `completed` starts
    /// false. The `id` is a placeholder until storage assigns the real one
    /// on insert.
    pub fn new(input: TaskCreate, owner_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            owner_id,
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date: input.due_date,
        }
    }

    /// Merges a partial update into this task and refreshes `updated_at`.
    ///
    /// Only fields present in `update` are applied. The owner and creation
    /// timestamp are never touched.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }
}
