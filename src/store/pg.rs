use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Task, TaskUpdate, User};
use crate::store::{Store, StoreError};

const TASK_COLUMNS: &str = "id, title, description, status, priority, user_id, created_at, updated_at";

/// PostgreSQL-backed store.
///
/// Holds the pool handed to it by `main`; the pool is the only shared mutable
/// resource, and its transactional guarantees are what the conditioned
/// statements below rely on.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Applies the migrations under `migrations/` to the connected database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Backend(e.to_string()))
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        // Uniqueness rides on the users_username_key constraint; a concurrent
        // signup with the same name loses with a unique violation, never a
        // second row.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks ({})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            TASK_COLUMNS, TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(&task.status)
            .bind(&task.priority)
            .bind(task.user_id)
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn find_and_count_tasks(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Task>, i64), StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((tasks, total))
    }

    async fn update_task_where(
        &self,
        task_id: Uuid,
        user_id: i32,
        changes: TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        // SET clauses are appended per supplied field, with the parameter
        // index tracked alongside. updated_at is always refreshed, so an
        // empty update still returns the (otherwise untouched) row.
        let mut sets: Vec<String> = Vec::new();
        let mut param_count = 1;

        if changes.title.is_some() {
            sets.push(format!("title = ${}", param_count));
            param_count += 1;
        }
        if changes.description.is_some() {
            sets.push(format!("description = ${}", param_count));
            param_count += 1;
        }
        if changes.status.is_some() {
            sets.push(format!("status = ${}", param_count));
            param_count += 1;
        }
        if changes.priority.is_some() {
            sets.push(format!("priority = ${}", param_count));
            param_count += 1;
        }
        sets.push("updated_at = NOW()".to_string());

        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ${} AND user_id = ${} RETURNING {}",
            sets.join(", "),
            param_count,
            param_count + 1,
            TASK_COLUMNS
        );

        let mut query = sqlx::query_as::<_, Task>(&sql);
        if let Some(title) = &changes.title {
            query = query.bind(title);
        }
        if let Some(description) = &changes.description {
            query = query.bind(description);
        }
        if let Some(status) = &changes.status {
            query = query.bind(status);
        }
        if let Some(priority) = &changes.priority {
            query = query.bind(priority);
        }
        query = query.bind(task_id).bind(user_id);

        let task = query.fetch_optional(&self.pool).await?;

        Ok(task)
    }

    async fn delete_task_where(&self, task_id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
