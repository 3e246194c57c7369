use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::validate_not_blank;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Transitions are free-form: an owner may set any status at any time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Completed,
}

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

/// Input structure for creating a task.
///
/// `status` and `priority` deserialize into the enumerated types, so a value
/// outside the permitted set is rejected before the handler runs; omitted
/// values take the model defaults in `Task::new`. Any `userId`-like field in
/// the payload is ignored: ownership comes from the session, never the body.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Required, non-blank.
    #[validate(custom = "validate_not_blank")]
    pub title: String,

    /// An optional description for the task.
    pub description: Option<String>,

    /// The status of the task. Defaults to `pending` when omitted.
    pub status: Option<TaskStatus>,

    /// The priority of the task. Defaults to `medium` when omitted.
    pub priority: Option<TaskPriority>,
}

/// Partial-update structure for a task. Any subset of the fields may be
/// supplied; a supplied title must not be blank after trimming.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    #[validate(custom = "validate_not_blank")]
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,
}

impl TaskUpdate {
    /// True when no field is supplied. Such an update is a no-op apart from
    /// refreshing `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// The priority of the task.
    pub priority: TaskPriority,
    /// Identifier of the user who owns the task. Set at creation from the
    /// authenticated caller and never changed by updates.
    pub user_id: i32,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owner's `user_id`.
    /// Applies the model defaults for omitted status/priority, sets
    /// `created_at`/`updated_at` to the current time and `id` to a new UUID.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Pagination query parameters for listing tasks.
///
/// Both fields arrive as raw strings: a value that is absent, non-numeric, or
/// below 1 falls back to the default (page 1, limit 10) instead of failing
/// the request. No upper bound is enforced on `limit`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        Self::coerce(self.page.as_deref(), 1)
    }

    pub fn limit(&self) -> i64 {
        Self::coerce(self.limit.as_deref(), 10)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    fn coerce(raw: Option<&str>, default: i64) -> i64 {
        raw.and_then(|value| value.parse::<i64>().ok())
            .filter(|value| *value >= 1)
            .unwrap_or(default)
    }
}

/// Paginated response envelope for `GET /api/tasks`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub total_tasks: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub tasks: Vec<Task>,
}

impl TaskPage {
    pub fn new(tasks: Vec<Task>, total_tasks: i64, current_page: i64, limit: i64) -> Self {
        Self {
            total_tasks,
            total_pages: (total_tasks + limit - 1) / limit,
            current_page,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_creation_applies_defaults() {
        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: None,
            status: None,
            priority: None,
        };

        let task = Task::new(input, 1);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.user_id, 1);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_creation_keeps_explicit_values() {
        let input = TaskInput {
            title: "Ship release".to_string(),
            description: Some("cut the tag first".to_string()),
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::Urgent),
        };

        let task = Task::new(input, 9);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.description.as_deref(), Some("cut the tag first"));
    }

    #[test]
    fn test_enum_wire_format() {
        let status = serde_json::to_value(TaskStatus::InProgress).unwrap();
        assert_eq!(status, serde_json::json!("in_progress"));

        let priority = serde_json::to_value(TaskPriority::Low).unwrap();
        assert_eq!(priority, serde_json::json!("low"));

        // Membership check happens at deserialization
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("done")).is_err());
        assert!(serde_json::from_value::<TaskPriority>(serde_json::json!("critical")).is_err());
    }

    #[test]
    fn test_task_input_validation() {
        let blank_title = TaskInput {
            title: "   ".to_string(),
            description: None,
            status: None,
            priority: None,
        };
        assert!(blank_title.validate().is_err());

        let valid = TaskInput {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
            status: Some(TaskStatus::Completed),
            priority: Some(TaskPriority::Low),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_task_update_validation() {
        let no_fields = TaskUpdate::default();
        assert!(no_fields.is_empty());
        assert!(no_fields.validate().is_ok());

        let blank_title = TaskUpdate {
            title: Some("  ".to_string()),
            ..TaskUpdate::default()
        };
        assert!(blank_title.validate().is_err());

        let status_only = TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..TaskUpdate::default()
        };
        assert!(!status_only.is_empty());
        assert!(status_only.validate().is_ok());
    }

    #[test]
    fn test_page_query_coercion() {
        let defaults = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(defaults.page(), 1);
        assert_eq!(defaults.limit(), 10);
        assert_eq!(defaults.offset(), 0);

        let numeric = PageQuery {
            page: Some("3".to_string()),
            limit: Some("25".to_string()),
        };
        assert_eq!(numeric.page(), 3);
        assert_eq!(numeric.limit(), 25);
        assert_eq!(numeric.offset(), 50);

        let garbage = PageQuery {
            page: Some("abc".to_string()),
            limit: Some("-5".to_string()),
        };
        assert_eq!(garbage.page(), 1);
        assert_eq!(garbage.limit(), 10);

        let zero = PageQuery {
            page: Some("0".to_string()),
            limit: Some("0".to_string()),
        };
        assert_eq!(zero.page(), 1);
        assert_eq!(zero.limit(), 10);
    }

    #[test]
    fn test_task_page_math() {
        let empty = TaskPage::new(Vec::new(), 0, 1, 10);
        assert_eq!(empty.total_pages, 0);

        let partial = TaskPage::new(Vec::new(), 25, 2, 10);
        assert_eq!(partial.total_pages, 3);

        let exact = TaskPage::new(Vec::new(), 30, 1, 10);
        assert_eq!(exact.total_pages, 3);
    }
}
