/// Database models for TaskDesk
///
/// Each model owns the SQL for its table. Functions are generic over the
/// sqlx executor so they run against a pool, a checked-out connection, or
/// a transaction alike.
///
/// # Models
///
/// - `user`: Accounts (`users` table)
/// - `task`: Per-user to-do items (`tasks` table)

pub mod task;
pub mod user;
