/// Task endpoints
///
/// - `POST /tasks` - Add a task for a user
/// - `GET /tasks/:username` - List a user's tasks

use crate::{app::AppState, error::ApiResult, routes::auth::MessageResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use taskdesk_shared::{models::task::Task, store::AddTask};

/// Add a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "username": "bob", "title": "write report" }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "message": "Task added" }`
///
/// # Errors
///
/// - `400 validation_error`: username or title missing or empty
/// - `404 user_not_found`: no account with that username
pub async fn add_task(
    State(state): State<AppState>,
    payload: Result<Json<AddTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;

    state.tasks.add_task(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Task added".to_string(),
        }),
    ))
}

/// List a user's tasks in creation order
///
/// # Response
///
/// ```json
/// [{ "id": 1, "user_id": 1, "title": "write report", "completed": false }]
/// ```
///
/// # Errors
///
/// - `404 user_not_found`: no account with that username
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list_tasks(&username).await?;
    Ok(Json(tasks))
}
