use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered user as held by the store.
///
/// Users are created at signup and immutable afterwards; no exposed operation
/// updates or deletes them. The struct is never serialized into a response,
/// so the password hash stays internal.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// One-way salted bcrypt hash. The plaintext password is never stored.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
