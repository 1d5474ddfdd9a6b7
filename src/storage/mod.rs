//! Storage boundary for principals and tasks.
//!
//! The services never talk to a database directly; they go through the
//! [`Storage`] trait, and a concrete handle is passed into each call via
//! application state. Two implementations ship with the crate: a Postgres
//! one for production and an in-process one used by the test suite and for
//! running without a database.

pub mod memory;
pub mod postgres;

pub use memory::MemStorage;
pub use postgres::PgStorage;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Principal, Task, TaskQuery};

/// Row-lookup contract required by the account and task services.
///
/// Every method is a single atomic operation; callers never observe a
/// half-applied write. Uniqueness of principal emails is enforced by the
/// account service (and, for Postgres, additionally by the schema).
#[async_trait]
pub trait Storage: Send + Sync {
    async fn find_principal_by_id(&self, id: i32) -> Result<Option<Principal>, AppError>;

    /// Exact, case-sensitive match against the stored email.
    async fn find_principal_by_email(&self, email: &str) -> Result<Option<Principal>, AppError>;

    async fn insert_principal(&self, email: &str, password_hash: &str)
        -> Result<Principal, AppError>;

    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>, AppError>;

    /// Returns the owner's tasks, filtered and ordered per `query`.
    /// Default order is creation time descending.
    async fn find_tasks_by_owner(
        &self,
        owner_id: i32,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, AppError>;

    /// Persists a new task and returns it with its storage-assigned id.
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;

    /// Replaces the stored task identified by `task.id`.
    async fn update_task(&self, task: &Task) -> Result<(), AppError>;

    /// Hard-deletes a task. Fails `NotFound` if no such row exists.
    async fn delete_task(&self, id: i32) -> Result<(), AppError>;
}
