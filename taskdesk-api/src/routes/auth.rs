/// Authentication endpoints
///
/// - `POST /signup` - Create an account
/// - `POST /login` - Verify a username/password pair
///
/// There is no session or token: a successful login only confirms the pair.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskdesk_shared::store::{CreateAccount, Credentials};

/// Confirmation body for writes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,

    /// Id of the authenticated account
    pub user_id: i64,
}

/// Create an account
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/json
///
/// { "username": "bob", "password": "x123" }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "message": "User created" }`
///
/// # Errors
///
/// - `400 validation_error`: username or password missing or empty
/// - `400 duplicate_username`: username already taken
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccount>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;

    state.accounts.create_account(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created".to_string(),
        }),
    ))
}

/// Verify credentials
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "bob", "password": "x123" }
/// ```
///
/// # Response
///
/// `200 OK` with `{ "message": "Login successful", "user_id": 1 }`
///
/// # Errors
///
/// - `401 invalid_credentials`: unknown username or wrong password, indistinguishably
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;

    let user = state.accounts.verify_credentials(req).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
    }))
}
