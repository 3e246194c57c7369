pub mod task;
pub mod user;

pub use task::{PageQuery, Task, TaskInput, TaskPage, TaskPriority, TaskStatus, TaskUpdate};
pub use user::User;

use validator::ValidationError;

/// Shared validator: rejects strings that are empty or whitespace-only.
///
/// Used by every mutating DTO that carries a required (or
/// required-when-present) text field, so the "non-blank" rule lives in one
/// place.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("x").is_ok());
        assert!(validate_not_blank("  x  ").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("\t\n").is_err());
    }
}
