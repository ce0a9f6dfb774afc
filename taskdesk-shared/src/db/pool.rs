/// SQLite connection pool
///
/// The pool is the storage handle handed to the stores. A store operation
/// checks one connection out and the connection goes back when the guard
/// drops. Every connection opens with `foreign_keys = ON` so the
/// `tasks.user_id` reference is enforced by SQLite itself.
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite://database.db".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await?;
/// assert_eq!(one, 1);
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pool and connection settings
///
/// Durations are whole seconds so they map directly onto env vars.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`
    pub url: String,

    /// Upper bound on open connections (default 5)
    ///
    /// SQLite admits one writer at a time; extra connections serve readers.
    pub max_connections: u32,

    /// Connections kept open while idle (default 1)
    pub min_connections: u32,

    /// Seconds to wait for a free connection before `PoolTimedOut` (default 30)
    pub connect_timeout_seconds: u64,

    /// Seconds before an idle connection is dropped, `None` to keep it (default 600)
    pub idle_timeout_seconds: Option<u64>,

    /// Seconds before any connection is recycled, `None` to keep it (default 1800)
    pub max_lifetime_seconds: Option<u64>,

    /// Seconds a statement waits on a locked database (default 5)
    pub busy_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
            busy_timeout_seconds: 5,
        }
    }
}

impl DatabaseConfig {
    fn connect_options(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        Ok(SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(self.busy_timeout_seconds)))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let seconds = |s: u64| Duration::from_secs(s);

        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(seconds(self.connect_timeout_seconds))
            .idle_timeout(self.idle_timeout_seconds.map(seconds))
            .max_lifetime(self.max_lifetime_seconds.map(seconds))
    }
}

/// Opens the pool, creating the database file when it is missing
///
/// # Errors
///
/// Fails when the URL does not parse, the file cannot be opened or created,
/// or the first `SELECT 1` does not come back.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        busy_timeout_seconds = config.busy_timeout_seconds,
        "Opening SQLite pool"
    );

    let pool = config
        .pool_options()
        .connect_with(config.connect_options()?)
        .await?;

    health_check(&pool).await?;

    info!("SQLite pool ready");
    Ok(pool)
}

/// Round-trips `SELECT 1` through a pooled connection
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let (value,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if value != 1 {
        warn!(value, "Unexpected health check result");
        return Err(sqlx::Error::Protocol(format!(
            "SELECT 1 returned {}",
            value
        )));
    }

    debug!("Database health check passed");
    Ok(())
}

/// Snapshot of pool occupancy
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Checked out right now
    pub active_connections: usize,

    /// Open and waiting in the pool
    pub idle_connections: usize,

    /// Active plus idle
    pub total_connections: usize,
}

pub fn get_pool_stats(pool: &SqlitePool) -> PoolStats {
    let total = pool.size() as usize;
    let idle = pool.num_idle();

    PoolStats {
        active_connections: total.saturating_sub(idle),
        idle_connections: idle,
        total_connections: total,
    }
}

/// Closes every connection, waiting for checked-out ones to come back
///
/// Call on shutdown so the WAL is checkpointed into the main file.
pub async fn close_pool(pool: SqlitePool) {
    debug!(stats = ?get_pool_stats(&pool), "Closing SQLite pool");
    pool.close().await;
    info!("SQLite pool closed");
}
