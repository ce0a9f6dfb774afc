/// Account Store: user identity and credential verification
///
/// # Operations
///
/// - [`AccountStore::create_account`]: registers a username/password pair
/// - [`AccountStore::verify_credentials`]: checks a login attempt
///
/// Username uniqueness is enforced by the `UNIQUE` constraint on
/// `users.username`. Concurrent registrations of one username race on the
/// insert and only one of them commits.
///
/// Argon2 work runs on tokio's blocking pool, off the async workers.

use crate::auth::password::{self, PasswordError, StoredMatch};
use crate::models::user::{NewUser, User};
use crate::store::error::{StoreError, StoreResult};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use validator::Validate;

/// Input for [`AccountStore::create_account`]
///
/// Fields are optional so a missing value surfaces as a validation error
/// rather than a decoding failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

impl CreateAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Input for [`AccountStore::verify_credentials`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Store owning the `users` table
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates an account
    ///
    /// The password is hashed before a connection is checked out, so the
    /// pool is not held during the Argon2 work.
    ///
    /// # Errors
    ///
    /// - `Validation` if either field is missing or empty
    /// - `DuplicateUsername` if the username is taken; no row is written
    pub async fn create_account(&self, input: CreateAccount) -> StoreResult<()> {
        input.validate()?;
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let password_hash = blocking(move || password::hash_password(&password)).await?;

        let mut conn = self.pool.acquire().await?;
        let result = User::create(
            &mut *conn,
            NewUser {
                username: username.clone(),
                password_hash,
            },
        )
        .await;

        match result {
            Ok(user_id) => {
                info!(user_id, username = %username, "Account created");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!(username = %username, "Rejected duplicate username");
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verifies a username/password pair and returns the matching account
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `InvalidCredentials`, and both paths perform one Argon2 computation.
    /// Missing fields count as a mismatch. A plaintext password left by the
    /// legacy service is accepted once and replaced by its Argon2 hash.
    pub async fn verify_credentials(&self, input: Credentials) -> StoreResult<User> {
        let (Some(username), Some(password)) = (input.username, input.password) else {
            debug!("Login attempt with missing fields");
            return Err(StoreError::InvalidCredentials);
        };

        let user = {
            let mut conn = self.pool.acquire().await?;
            User::find_by_username(&mut *conn, &username).await?
        };

        let Some(user) = user else {
            blocking(move || {
                password::simulate_verification(&password);
                Ok(())
            })
            .await?;
            debug!(username = %username, "Login failed");
            return Err(StoreError::InvalidCredentials);
        };

        let stored = user.password_hash.clone();
        let outcome =
            blocking(move || password::check_stored_password(&password, &stored)).await?;

        match outcome {
            StoredMatch::Hashed => {
                info!(user_id = user.id, "Login succeeded");
                Ok(user)
            }
            StoredMatch::Legacy { rehashed } => {
                let mut conn = self.pool.acquire().await?;
                User::update_password(&mut *conn, user.id, &rehashed).await?;
                info!(user_id = user.id, "Login succeeded; legacy password upgraded to Argon2");
                Ok(User {
                    password_hash: rehashed,
                    ..user
                })
            }
            StoredMatch::Mismatch => {
                debug!(username = %username, "Login failed");
                Err(StoreError::InvalidCredentials)
            }
        }
    }
}

/// Runs password work on the blocking pool
async fn blocking<T, F>(work: F) -> StoreResult<T>
where
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| PasswordError::HashError(format!("Password task failed: {}", e)))?;

    Ok(result?)
}
