use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Principal, Task, TaskQuery, TaskSort};
use crate::storage::Storage;

const TASK_COLUMNS: &str =
    "id, owner_id, title, description, completed, created_at, updated_at, due_date";

const PRINCIPAL_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Postgres-backed storage over a shared connection pool.
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn find_principal_by_id(&self, id: i32) -> Result<Option<Principal>, AppError> {
        let principal = sqlx::query_as::<_, Principal>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PRINCIPAL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    async fn find_principal_by_email(&self, email: &str) -> Result<Option<Principal>, AppError> {
        let principal = sqlx::query_as::<_, Principal>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            PRINCIPAL_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    async fn insert_principal(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Principal, AppError> {
        let now = Utc::now();
        let principal = sqlx::query_as::<_, Principal>(&format!(
            "INSERT INTO users (email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             RETURNING {}",
            PRINCIPAL_COLUMNS
        ))
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(principal)
    }

    async fn find_task_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn find_tasks_by_owner(
        &self,
        owner_id: i32,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, AppError> {
        let mut sql = format!("SELECT {} FROM tasks WHERE owner_id = $1", TASK_COLUMNS);

        if query.completed.is_some() {
            sql.push_str(" AND completed = $2");
        }

        sql.push_str(match query.sort {
            Some(TaskSort::Created) => " ORDER BY created_at",
            Some(TaskSort::Title) => " ORDER BY title",
            Some(TaskSort::DueDate) => " ORDER BY due_date",
            None => " ORDER BY created_at DESC",
        });

        let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(owner_id);
        if let Some(completed) = query.completed {
            query_builder = query_builder.bind(completed);
        }

        let tasks = query_builder.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let inserted = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (owner_id, title, description, completed, created_at, updated_at, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.owner_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(task.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tasks \
             SET title = $1, description = $2, completed = $3, updated_at = $4, due_date = $5 \
             WHERE id = $6",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.updated_at)
        .bind(task.due_date)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    async fn delete_task(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
