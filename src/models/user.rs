use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// An authenticated account that owns tasks.
///
/// The `password_hash` field holds the bcrypt hash of the account password
/// and is never serialized outward. `id` and `email` are immutable once the
/// account exists.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Principal {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
