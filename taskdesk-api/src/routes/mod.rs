/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Account creation and login
/// - `tasks`: Per-user task creation and listing

pub mod auth;
pub mod health;
pub mod tasks;
