//! Persistence port.
//!
//! The services talk to storage through the narrow [`Store`] trait below.
//! [`pg::PgStore`] is the production backend; [`memory::MemoryStore`] backs
//! the test suites so they need no database. Both enforce uniqueness and
//! ownership with atomic, conditioned operations rather than read-then-write
//! sequences, which is what keeps concurrent requests race-free without any
//! application-level locking.

pub mod memory;
pub mod pg;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Task, TaskUpdate, User};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Errors surfaced by a store backend.
#[derive(Debug)]
pub enum StoreError {
    /// A write violated a uniqueness constraint (e.g. a taken username).
    Conflict(String),
    /// Any other backend failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            StoreError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Maps unique-constraint violations to `Conflict`; everything else is a
/// backend failure.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db_err) = &error {
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return StoreError::Conflict(db_err.to_string());
            }
        }
        StoreError::Backend(error.to_string())
    }
}

/// Narrow persistence interface for users and tasks.
///
/// Every task write that must respect ownership takes the owner's id and is
/// implemented as a single conditioned statement: a task that exists but
/// belongs to someone else is indistinguishable from one that does not exist.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user. Fails with `StoreError::Conflict` when the
    /// username is already taken; the check-and-insert is atomic.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Looks up a user by username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Persists a fully-built task.
    async fn insert_task(&self, task: Task) -> Result<Task, StoreError>;

    /// Returns one page of the given user's tasks, most recently created
    /// first, together with the user's total task count.
    async fn find_and_count_tasks(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Task>, i64), StoreError>;

    /// Applies a partial update to the task matching both `task_id` and
    /// `user_id`, refreshing `updated_at`. Returns `None` when no such task
    /// exists (including when it exists under a different owner).
    async fn update_task_where(
        &self,
        task_id: Uuid,
        user_id: i32,
        changes: TaskUpdate,
    ) -> Result<Option<Task>, StoreError>;

    /// Deletes the task matching both `task_id` and `user_id`. Returns
    /// whether a row was deleted.
    async fn delete_task_where(&self, task_id: Uuid, user_id: i32) -> Result<bool, StoreError>;
}
