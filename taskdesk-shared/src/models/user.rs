/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT UNIQUE NOT NULL,
///     password TEXT NOT NULL
/// );
/// ```
///
/// The `password` column holds an Argon2id PHC string. Rows written by the
/// legacy service hold plaintext until their owner's next successful login.
/// Usernames compare with SQLite's default BINARY collation, so lookups are
/// case-sensitive.

use serde::Serialize;
use sqlx::{Executor, Sqlite};

/// User account row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Surrogate key assigned by SQLite, never reused
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Argon2id password hash, or legacy plaintext
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input for inserting a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,

    /// Already-hashed password
    pub password_hash: String,
}

impl User {
    /// Inserts a user and returns the generated id
    ///
    /// # Errors
    ///
    /// Fails with a unique-violation database error if the username is taken.
    pub async fn create<'e, E>(executor: E, data: NewUser) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(data.username)
            .bind(data.password_hash)
            .execute(executor)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Finds a user by exact username
    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(executor)
            .await
    }

    /// Replaces the stored credential, used to upgrade legacy plaintext rows
    pub async fn update_password<'e, E>(
        executor: E,
        id: i64,
        password_hash: &str,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Counts all accounts
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
