/// Error taxonomy shared by the account and task stores
///
/// Every variant is recoverable at the request boundary. `Password` and
/// `Database` are the internal kinds: the caller sees a generic failure while
/// the detail goes to the logs.

use crate::auth::password::PasswordError;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field is missing or empty
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// The username is already registered
    #[error("Username already exists")]
    DuplicateUsername,

    /// The referenced username has no account
    #[error("User not found")]
    UserNotFound,

    /// Username and password do not match an account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Unexpected storage fault
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        // field_errors() is a HashMap
        details.sort_by(|a, b| a.field.cmp(&b.field));
        StoreError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StoreError::DuplicateUsername.to_string(),
            "Username already exists"
        );
        assert_eq!(StoreError::UserNotFound.to_string(), "User not found");

        let err = StoreError::Validation(vec![
            FieldError {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            },
            FieldError {
                field: "username".to_string(),
                message: "Username is required".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
