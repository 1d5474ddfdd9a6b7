use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::{Principal, Task, TaskQuery, TaskSort};
use crate::storage::Storage;

/// In-process storage backed by plain maps.
///
/// Used by the test suite and for running the server without Postgres.
/// Ids are assigned from per-table counters; every trait method takes the
/// single lock for its whole duration, so each call is atomic.
pub struct MemStorage {
    inner: Mutex<Inner>,
}

struct Inner {
    users: BTreeMap<i32, Principal>,
    tasks: BTreeMap<i32, Task>,
    next_user_id: i32,
    next_task_id: i32,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: BTreeMap::new(),
                tasks: BTreeMap::new(),
                next_user_id: 1,
                next_task_id: 1,
            }),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned() -> AppError {
    AppError::InternalServerError("Storage lock poisoned".into())
}

#[async_trait]
impl Storage for MemStorage {
    async fn find_principal_by_id(&self, id: i32) -> Result<Option<Principal>, AppError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_principal_by_email(&self, email: &str) -> Result<Option<Principal>, AppError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_principal(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Principal, AppError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let now = Utc::now();
        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let principal = Principal {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(id, principal.clone());
        Ok(principal)
    }

    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn find_tasks_by_owner(
        &self,
        owner_id: i32,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, AppError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .filter(|t| query.completed.map_or(true, |c| t.completed == c))
            .cloned()
            .collect();

        match query.sort {
            Some(TaskSort::Created) => tasks.sort_by_key(|t| t.created_at),
            Some(TaskSort::Title) => tasks.sort_by(|a, b| a.title.cmp(&b.title)),
            // Tasks without a due date sort last, matching Postgres NULLS LAST.
            Some(TaskSort::DueDate) => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
            None => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(tasks)
    }

    async fn insert_task(&self, mut task: Task) -> Result<Task, AppError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        task.id = inner.next_task_id;
        inner.next_task_id += 1;
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        if !inner.tasks.contains_key(&task.id) {
            return Err(AppError::NotFound("Task not found".into()));
        }
        inner.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: i32) -> Result<(), AppError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        if inner.tasks.remove(&id).is_none() {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
