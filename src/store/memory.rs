//! In-memory store implementation for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Task, TaskUpdate, User};
use crate::store::{Store, StoreError};

/// In-memory store with the same semantics as `PgStore`: username uniqueness
/// and ownership-conditioned writes are each a single critical section behind
/// the lock, so concurrent requests observe the same atomicity the database
/// constraints provide.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<i32, User>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
    next_user_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            next_user_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!(
                "username \"{}\" already exists",
                username
            )));
        }
        let user = User {
            id: self.next_user_id.fetch_add(1, Ordering::SeqCst),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn insert_task(&self, task: Task) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_and_count_tasks(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Task>, i64), StoreError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // created_at descending; id breaks the (unlikely) timestamp ties so
        // page boundaries stay deterministic
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = owned.len() as i64;
        let page = owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn update_task_where(
        &self,
        task_id: Uuid,
        user_id: i32,
        changes: TaskUpdate,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task_id) {
            Some(task) if task.user_id == user_id => {
                if let Some(title) = changes.title {
                    task.title = title;
                }
                if let Some(description) = changes.description {
                    task.description = Some(description);
                }
                if let Some(status) = changes.status {
                    task.status = status;
                }
                if let Some(priority) = changes.priority {
                    task.priority = priority;
                }
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            // Not owned reads the same as not found
            _ => Ok(None),
        }
    }

    async fn delete_task_where(&self, task_id: Uuid, user_id: i32) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&task_id) {
            Some(task) if task.user_id == user_id => {
                tasks.remove(&task_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskInput, TaskPriority, TaskStatus};

    fn task_for(store_user: i32, title: &str) -> Task {
        Task::new(
            TaskInput {
                title: title.to_string(),
                description: None,
                status: None,
                priority: None,
            },
            store_user,
        )
    }

    #[actix_rt::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash1").await.unwrap();

        let err = store.create_user("alice", "hash2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // The losing signup must not have produced a second user
        let found = store.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "hash1");
    }

    #[actix_rt::test]
    async fn test_update_is_ownership_scoped() {
        let store = MemoryStore::new();
        let task = store.insert_task(task_for(1, "mine")).await.unwrap();

        let changes = TaskUpdate {
            title: Some("stolen".to_string()),
            ..TaskUpdate::default()
        };
        let result = store.update_task_where(task.id, 2, changes).await.unwrap();
        assert!(result.is_none());

        // Untouched for the real owner
        let (tasks, total) = store.find_and_count_tasks(1, 10, 0).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(tasks[0].title, "mine");
    }

    #[actix_rt::test]
    async fn test_update_applies_subset_and_refreshes_updated_at() {
        let store = MemoryStore::new();
        let task = store.insert_task(task_for(1, "before")).await.unwrap();

        let changes = TaskUpdate {
            status: Some(TaskStatus::Completed),
            priority: Some(TaskPriority::High),
            ..TaskUpdate::default()
        };
        let updated = store
            .update_task_where(task.id, 1, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "before");
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.priority, TaskPriority::High);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[actix_rt::test]
    async fn test_delete_is_ownership_scoped_and_not_idempotent() {
        let store = MemoryStore::new();
        let task = store.insert_task(task_for(1, "target")).await.unwrap();

        assert!(!store.delete_task_where(task.id, 2).await.unwrap());
        assert!(store.delete_task_where(task.id, 1).await.unwrap());
        assert!(!store.delete_task_where(task.id, 1).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_pagination_most_recent_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_task(task_for(1, &format!("task {}", i)))
                .await
                .unwrap();
        }
        store.insert_task(task_for(2, "other user")).await.unwrap();

        let (first_page, total) = store.find_and_count_tasks(1, 2, 0).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first_page.len(), 2);
        assert!(first_page[0].created_at >= first_page[1].created_at);

        let (last_page, _) = store.find_and_count_tasks(1, 2, 4).await.unwrap();
        assert_eq!(last_page.len(), 1);

        let (beyond, total) = store.find_and_count_tasks(1, 2, 10).await.unwrap();
        assert_eq!(total, 5);
        assert!(beyond.is_empty());
    }
}
