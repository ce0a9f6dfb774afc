/// Common test utilities for API integration tests
///
/// Builds the real router over a fresh, migrated, file-backed SQLite
/// database and offers small request helpers.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use taskdesk_api::app::{build_router, AppState};
use taskdesk_api::config::Config;
use taskdesk_shared::db::migrations::run_migrations;
use taskdesk_shared::db::pool::{create_pool, DatabaseConfig};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestContext {
    pub app: axum::Router,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("api.db").display());

        let config = Config::from_vars(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            _ => None,
        })?;

        let db = create_pool(DatabaseConfig {
            url: config.database.url.clone(),
            max_connections: config.database.max_connections,
            ..Default::default()
        })
        .await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db, config));
        Ok(Self { app, _dir: dir })
    }

    /// Sends a JSON POST and returns status plus decoded body
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Sends a GET and returns status plus decoded body
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("Non-JSON body ({}): {}", status, String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }
}
