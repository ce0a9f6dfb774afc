/// Task model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL,
///     title TEXT NOT NULL,
///     completed INTEGER DEFAULT 0,
///     FOREIGN KEY(user_id) REFERENCES users(id)
/// );
/// ```
///
/// Tasks are append-only: nothing updates `completed` after insertion.

use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite};

/// To-do item owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    /// Owning user's id
    pub user_id: i64,

    pub title: String,

    /// Stored as INTEGER 0/1
    pub completed: bool,
}

/// Input for inserting a task row
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: i64,
    pub title: String,
}

impl Task {
    /// Inserts an incomplete task and returns the generated id
    ///
    /// # Errors
    ///
    /// Fails with a foreign-key database error if `user_id` has no user row.
    pub async fn create<'e, E>(executor: E, data: NewTask) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("INSERT INTO tasks (user_id, title, completed) VALUES (?, ?, 0)")
            .bind(data.user_id)
            .bind(data.title)
            .execute(executor)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Lists a user's tasks in insertion order (ascending id)
    pub async fn list_by_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, COALESCE(completed, 0) AS completed
            FROM tasks
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }

    /// Counts all tasks across users
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
