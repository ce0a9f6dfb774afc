//! # TaskDesk Shared Library
//!
//! Data layer for the TaskDesk backend: connection pooling, schema
//! migrations, row models, password hashing, and the account/task stores
//! that the API server calls into.
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and migrations
//! - `models`: Row types and their queries
//! - `auth`: Password hashing
//! - `store`: Account Store and Task Store with their error taxonomy

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the TaskDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
