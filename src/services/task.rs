//! Task CRUD, scoped to the authenticated principal.
//!
//! Every operation that touches an existing task loads it first, then runs
//! the ownership guard before disclosing or mutating anything. A missing
//! task is `NotFound`; a task owned by someone else is `Forbidden`. The
//! ownership check always completes before any storage write begins.

use chrono::Utc;
use validator::Validate;

use crate::auth::guard::authorize;
use crate::error::AppError;
use crate::models::{Principal, Task, TaskCreate, TaskQuery, TaskUpdate};
use crate::storage::Storage;

/// Lists the principal's tasks, filtered and sorted per `query`.
pub async fn list(
    store: &dyn Storage,
    principal: &Principal,
    query: &TaskQuery,
) -> Result<Vec<Task>, AppError> {
    store.find_tasks_by_owner(principal.id, query).await
}

/// Fetches one task. `NotFound` if no task has that id, `Forbidden` if it
/// exists but belongs to another principal.
pub async fn get(
    store: &dyn Storage,
    principal: &Principal,
    task_id: i32,
) -> Result<Task, AppError> {
    let task = store
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    authorize(principal, &task)?;
    Ok(task)
}

/// Creates a task owned by the principal.
///
/// Ownership is forced to the principal's id regardless of anything the
/// client sent; `completed` starts false and both timestamps are set to the
/// creation time.
pub async fn create(
    store: &dyn Storage,
    principal: &Principal,
    input: TaskCreate,
) -> Result<Task, AppError> {
    input.validate()?;
    store.insert_task(Task::new(input, principal.id)).await
}

/// Applies a partial update to an owned task.
///
/// Only fields present in `update` are changed; `owner_id` is not part of
/// the update payload at all and `updated_at` is refreshed.
pub async fn update(
    store: &dyn Storage,
    principal: &Principal,
    task_id: i32,
    update: TaskUpdate,
) -> Result<Task, AppError> {
    update.validate()?;

    let mut task = get(store, principal, task_id).await?;
    task.apply(update);
    store.update_task(&task).await?;
    Ok(task)
}

/// Hard-deletes an owned task.
pub async fn delete(
    store: &dyn Storage,
    principal: &Principal,
    task_id: i32,
) -> Result<(), AppError> {
    get(store, principal, task_id).await?;
    store.delete_task(task_id).await
}

/// Flips the `completed` flag on an owned task and refreshes `updated_at`.
pub async fn toggle_complete(
    store: &dyn Storage,
    principal: &Principal,
    task_id: i32,
) -> Result<Task, AppError> {
    let mut task = get(store, principal, task_id).await?;
    task.completed = !task.completed;
    task.updated_at = Utc::now();
    store.update_task(&task).await?;
    Ok(task)
}
