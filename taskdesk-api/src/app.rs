/// Router assembly and the state shared by handlers
///
/// # Example
///
/// ```no_run
/// use taskdesk_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::SqlitePool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = SqlitePool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use taskdesk_shared::store::{AccountStore, TaskStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The stores
/// hold clones of the same pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Account Store
    pub accounts: AccountStore,

    /// Task Store
    pub tasks: TaskStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds both stores over one pool
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            accounts: AccountStore::new(db.clone()),
            tasks: TaskStore::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

/// Wires the five routes onto `state`
///
/// ```text
/// /
/// ├── GET  /health
/// ├── POST /signup
/// ├── POST /login
/// ├── POST /tasks
/// └── GET  /tasks/:username
/// ```
///
/// Middleware (outermost last): request tracing, CORS.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let cors = if state.config.allows_any_origin() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/tasks", post(routes::tasks::add_task))
        .route("/tasks/:username", get(routes::tasks::list_tasks))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
