/// Schema migrations
///
/// SQL files in the workspace `migrations/` directory are compiled into the
/// crate with `sqlx::migrate!` and applied at startup. The statements use
/// `IF NOT EXISTS`, so a database whose tables were created by hand is
/// adopted rather than rejected.
///
/// ```no_run
/// use taskdesk_shared::db::migrations::{get_migration_status, run_migrations};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// run_migrations(&pool).await?;
/// assert!(get_migration_status(&pool).await?.is_up_to_date);
/// # Ok(())
/// # }
/// ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, error, info};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applied-versus-embedded migration state
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Rows in `_sqlx_migrations` that finished successfully
    pub applied_migrations: usize,

    /// Highest applied version, `None` on a fresh database
    pub latest_version: Option<i64>,

    /// No embedded migration is left to apply
    pub is_up_to_date: bool,
}

/// Applies every embedded migration not yet recorded in the database
///
/// # Errors
///
/// Fails if a statement errors or if an applied migration's checksum no
/// longer matches the embedded file.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    info!(embedded = embedded_migration_count(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        error!(error = %e, "Schema migration failed");
        e
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// Number of migrations compiled into this build
pub fn embedded_migration_count() -> usize {
    MIGRATOR.iter().count()
}

/// Reads migration bookkeeping without applying anything
pub async fn get_migration_status(pool: &SqlitePool) -> Result<MigrationStatus, sqlx::Error> {
    let embedded = embedded_migration_count();

    let bookkeeping: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_optional(pool)
    .await?;

    if bookkeeping.is_none() {
        debug!("No _sqlx_migrations table yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: embedded == 0,
        });
    }

    let (applied, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = 1",
    )
    .fetch_one(pool)
    .await?;

    let applied_migrations = applied as usize;
    debug!(applied_migrations, embedded, latest_version = ?latest_version, "Migration status");

    Ok(MigrationStatus {
        applied_migrations,
        latest_version,
        is_up_to_date: applied_migrations >= embedded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    async fn memory_pool() -> SqlitePool {
        create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            idle_timeout_seconds: None,
            max_lifetime_seconds: None,
            ..Default::default()
        })
        .await
        .expect("Failed to create pool")
    }

    #[test]
    fn test_migrations_are_embedded() {
        assert!(embedded_migration_count() >= 1);
    }

    #[tokio::test]
    async fn test_status_before_and_after_migrating() {
        let pool = memory_pool().await;

        let before = get_migration_status(&pool).await.unwrap();
        assert_eq!(before.applied_migrations, 0);
        assert!(before.latest_version.is_none());
        assert!(!before.is_up_to_date);

        run_migrations(&pool).await.unwrap();

        let after = get_migration_status(&pool).await.unwrap();
        assert_eq!(after.applied_migrations, embedded_migration_count());
        assert!(after.latest_version.is_some());
        assert!(after.is_up_to_date);
    }

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = memory_pool().await;

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'tasks') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["tasks".to_string(), "users".to_string()]);
    }
}
