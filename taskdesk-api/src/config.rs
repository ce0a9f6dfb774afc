/// Server configuration from the environment
///
/// Loads configuration from environment variables (and a `.env` file in
/// development) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 127.0.0.1)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://database.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter (default: taskdesk_api=debug,taskdesk_shared=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use taskdesk_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or if
    /// `DATABASE_MAX_CONNECTIONS` is zero.
    pub fn from_env() -> anyhow::Result<Self> {
        // .env is optional
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let url = var("DATABASE_URL").unwrap_or_else(|| "sqlite://database.db".to_string());

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is not a number: {}", e))?;

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether CORS should allow any origin
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}
