/// Account and task stores
///
/// The stores are the request-facing data layer. Each holds an injected
/// [`SqlitePool`](sqlx::SqlitePool) and checks out one connection per
/// operation; the connection goes back to the pool when the operation
/// returns, on success and error paths alike.
///
/// - [`AccountStore`]: account creation and credential verification
/// - [`TaskStore`]: task creation and listing, scoped to an existing user
///
/// # Example
///
/// ```no_run
/// use taskdesk_shared::store::{AccountStore, AddTask, CreateAccount, TaskStore};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), taskdesk_shared::store::StoreError> {
/// let accounts = AccountStore::new(pool.clone());
/// let tasks = TaskStore::new(pool);
///
/// accounts.create_account(CreateAccount::new("alice", "pw")).await?;
/// tasks.add_task(AddTask::new("alice", "buy milk")).await?;
///
/// let listed = tasks.list_tasks("alice").await?;
/// assert_eq!(listed.len(), 1);
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod error;
pub mod task;

pub use account::{AccountStore, CreateAccount, Credentials};
pub use error::{FieldError, StoreError, StoreResult};
pub use task::{AddTask, TaskStore};
