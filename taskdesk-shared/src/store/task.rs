/// Task Store: per-user to-do items
///
/// Every operation first resolves the username to a user id. An unknown
/// username yields `UserNotFound` before anything is written. The foreign
/// key on `tasks.user_id` stays the source of truth: if it rejects an
/// insert, the store reports the same `UserNotFound`.

use crate::models::task::{NewTask, Task};
use crate::models::user::User;
use crate::store::error::{StoreError, StoreResult};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use validator::Validate;

/// Input for [`TaskStore::add_task`]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddTask {
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Title is required"),
        length(min = 1, message = "Title is required")
    )]
    pub title: Option<String>,
}

impl AddTask {
    pub fn new(username: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            title: Some(title.into()),
        }
    }
}

/// Store owning the `tasks` table
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds an incomplete task owned by `username`
    ///
    /// # Errors
    ///
    /// - `Validation` if either field is missing or empty
    /// - `UserNotFound` if no account has this username; no row is written
    pub async fn add_task(&self, input: AddTask) -> StoreResult<()> {
        input.validate()?;
        let username = input.username.unwrap_or_default();
        let title = input.title.unwrap_or_default();

        let mut conn = self.pool.acquire().await?;

        let Some(user) = User::find_by_username(&mut *conn, &username).await? else {
            debug!(username = %username, "Task rejected for unknown user");
            return Err(StoreError::UserNotFound);
        };

        let result = Task::create(
            &mut *conn,
            NewTask {
                user_id: user.id,
                title,
            },
        )
        .await;

        match result {
            Ok(task_id) => {
                info!(task_id, user_id = user.id, "Task added");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                warn!(user_id = user.id, "Task insert rejected by foreign key");
                Err(StoreError::UserNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists every task owned by `username`, ascending by id
    ///
    /// An existing user with no tasks gets an empty list.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no account has this username
    pub async fn list_tasks(&self, username: &str) -> StoreResult<Vec<Task>> {
        let mut conn = self.pool.acquire().await?;

        let Some(user) = User::find_by_username(&mut *conn, username).await? else {
            debug!(username = %username, "Task listing for unknown user");
            return Err(StoreError::UserNotFound);
        };

        let tasks = Task::list_by_user(&mut *conn, user.id).await?;
        debug!(user_id = user.id, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_task_requires_title() {
        let input = AddTask {
            username: Some("alice".to_string()),
            title: None,
        };

        match StoreError::from(input.validate().unwrap_err()) {
            StoreError::Validation(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "title");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_add_task_rejects_empty_username() {
        let err = AddTask::new("", "buy milk").validate().unwrap_err();
        assert!(err.field_errors().contains_key("username"));
    }
}
