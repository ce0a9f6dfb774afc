/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "migrations": { "applied": 1, "up_to_date": true }
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdesk_shared::db::{migrations, pool};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Schema migration state, absent when the database is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationsHealth>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationsHealth {
    pub applied: usize,
    pub up_to_date: bool,
}

/// Reports service health including database connectivity and schema state
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = pool::health_check(&state.db).await.is_ok();

    let schema = if connected {
        migrations::get_migration_status(&state.db)
            .await
            .ok()
            .map(|status| MigrationsHealth {
                applied: status.applied_migrations,
                up_to_date: status.is_up_to_date,
            })
    } else {
        None
    };

    let healthy = connected && schema.as_ref().is_some_and(|m| m.up_to_date);

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        migrations: schema,
    }))
}
