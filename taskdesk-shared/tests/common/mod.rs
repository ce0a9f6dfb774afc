//! Shared setup for store integration tests
//!
//! Each context owns a fresh file-backed SQLite database in a temporary
//! directory, migrated and ready. The directory is removed on drop.

#![allow(dead_code)]

use sqlx::SqlitePool;
use taskdesk_shared::db::migrations::run_migrations;
use taskdesk_shared::db::pool::{create_pool, DatabaseConfig};
use taskdesk_shared::store::{AccountStore, TaskStore};
use tempfile::TempDir;

pub struct TestContext {
    pub db: SqlitePool,
    pub accounts: AccountStore,
    pub tasks: TaskStore,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let db = create_pool(test_database_config(&dir)).await?;
        run_migrations(&db).await?;

        Ok(Self {
            accounts: AccountStore::new(db.clone()),
            tasks: TaskStore::new(db.clone()),
            db,
            _dir: dir,
        })
    }
}

pub fn test_database_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("test.db").display()),
        max_connections: 5,
        ..Default::default()
    }
}
