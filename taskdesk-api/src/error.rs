/// HTTP error mapping
///
/// Handlers return `ApiResult<T>`; every `ApiError` converts into a JSON body
/// with a machine-readable `error` code and a human-readable `message`.
///
/// | Variant | Status | Code |
/// |---|---|---|
/// | `BadRequest` | 400 | `bad_request` |
/// | `ValidationError` | 400 | `validation_error` |
/// | `DuplicateUsername` | 400 | `duplicate_username` |
/// | `InvalidCredentials` | 401 | `invalid_credentials` |
/// | `UserNotFound` | 404 | `user_not_found` |
/// | `InternalError` | 500 | `internal_error` |

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskdesk_shared::store::{FieldError, StoreError};

/// Handler result
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure classification returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Body is not decodable JSON
    BadRequest(String),

    /// Required fields are missing or empty
    ValidationError(Vec<FieldError>),

    /// Username is already registered
    DuplicateUsername,

    /// Login did not match an account
    InvalidCredentials,

    /// Referenced username has no account
    UserNotFound,

    /// Unexpected storage or hashing fault
    InternalError(String),
}

/// JSON body of every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "validation_error", "user_not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::DuplicateUsername => write!(f, "Username already exists"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::UserNotFound => write!(f, "User not found"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::ValidationError(_)
            | ApiError::DuplicateUsername => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_code, message, details) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::ValidationError(errors) => {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                ("validation_error", message, Some(errors))
            }
            ApiError::DuplicateUsername => {
                ("duplicate_username", "Username already exists".to_string(), None)
            }
            ApiError::InvalidCredentials => {
                ("invalid_credentials", "Invalid credentials".to_string(), None)
            }
            ApiError::UserNotFound => ("user_not_found", "User not found".to_string(), None),
            ApiError::InternalError(detail) => {
                tracing::error!(%detail, "Request failed on an internal fault");
                ("internal_error", "An internal error occurred".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::ValidationError(errors),
            StoreError::DuplicateUsername => ApiError::DuplicateUsername,
            StoreError::UserNotFound => ApiError::UserNotFound,
            StoreError::InvalidCredentials => ApiError::InvalidCredentials,
            err @ (StoreError::Password(_) | StoreError::Database(_)) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
