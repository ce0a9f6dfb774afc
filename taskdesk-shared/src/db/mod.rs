/// Database layer for TaskDesk
///
/// # Modules
///
/// - `pool`: SQLite connection pool with health checks
/// - `migrations`: Embedded schema migrations
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://database.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     taskdesk_shared::db::migrations::run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
