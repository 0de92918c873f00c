//! Domain model types for the task tracker.

use serde::{Deserialize, Serialize};

/// Identifier of a user row.
pub type UserId = i64;

/// Identifier of a task row.
pub type TaskId = i64;

/// Task lifecycle status.
///
/// The numeric codes match the static `status` lookup table
/// (1=ready_to_pick through 5=deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Newly created, waiting to be picked up.
    #[default]
    ReadyToPick = 1,
    /// Actively being worked on.
    InProgress = 2,
    /// Cannot proceed for now.
    Blocked = 3,
    /// Finished successfully.
    Completed = 4,
    /// Soft-deleted. Terminal: no operation transitions out of it.
    Deleted = 5,
}

impl Status {
    /// Create a status from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 1-5.
    pub const fn from_code(code: i64) -> Result<Self, InvalidStatus> {
        match code {
            1 => Ok(Self::ReadyToPick),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Blocked),
            4 => Ok(Self::Completed),
            5 => Ok(Self::Deleted),
            _ => Err(InvalidStatus(code)),
        }
    }

    /// Get the numeric code of the status.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Get the snake_case name used in the `status` lookup table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadyToPick => "ready_to_pick",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
        }
    }

    /// Get the human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ReadyToPick => "Ready to Pick",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Completed => "Completed",
            Self::Deleted => "Deleted",
        }
    }

    /// Whether a task in this status may be resumed into `InProgress`.
    #[must_use]
    pub const fn is_startable(self) -> bool {
        matches!(self, Self::ReadyToPick | Self::Blocked)
    }

    /// All statuses in code order.
    pub const ALL: [Self; 5] =
        [Self::ReadyToPick, Self::InProgress, Self::Blocked, Self::Completed, Self::Deleted];
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error when an invalid status code is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatus(pub i64);

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid status code: {} (must be 1-5)", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// Task category.
///
/// The numeric codes match the static `category` lookup table
/// (1=work, 2=leisure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Work-related task.
    Work = 1,
    /// Personal / leisure task.
    Leisure = 2,
}

impl Category {
    /// Create a category from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 1 or 2.
    pub const fn from_code(code: i64) -> Result<Self, InvalidCategory> {
        match code {
            1 => Ok(Self::Work),
            2 => Ok(Self::Leisure),
            _ => Err(InvalidCategory(code)),
        }
    }

    /// Get the numeric code of the category.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Get the snake_case name used in the `category` lookup table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Leisure => "leisure",
        }
    }

    /// Get the human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Leisure => "Leisure",
        }
    }

    /// All categories in code order.
    pub const ALL: [Self; 2] = [Self::Work, Self::Leisure];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error when an invalid category code is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCategory(pub i64);

impl std::fmt::Display for InvalidCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid category code: {} (must be 1 or 2)", self.0)
    }
}

impl std::error::Error for InvalidCategory {}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store.
    pub id: UserId,
    /// Unique username (case-sensitive).
    pub name: String,
    /// Salted credential digest in `salt$digest` hex form. Never the
    /// plaintext password.
    pub credential_hash: String,
    /// RFC 3339 timestamp when the account was created.
    pub created_at: String,
}

/// A task row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Current lifecycle status.
    pub status: Status,
    /// Identifier of the owning user.
    pub owner_id: UserId,
    /// Category, fixed at creation.
    pub category: Category,
    /// RFC 3339 timestamp when the task was created.
    pub created_at: String,
    /// RFC 3339 timestamp of the last successful mutation.
    pub updated_at: String,
}

impl Task {
    /// Check if the task has been soft-deleted (terminal state).
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self.status, Status::Deleted)
    }
}

/// A list-query row: the task's fields joined with the owner's username
/// and the display names from the status and category lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Username of the owning user.
    pub owner_name: String,
    /// Display name of the current status.
    pub status_name: String,
    /// Display name of the category.
    pub category_name: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_code() {
        assert_eq!(Status::from_code(1).unwrap(), Status::ReadyToPick);
        assert_eq!(Status::from_code(2).unwrap(), Status::InProgress);
        assert_eq!(Status::from_code(3).unwrap(), Status::Blocked);
        assert_eq!(Status::from_code(4).unwrap(), Status::Completed);
        assert_eq!(Status::from_code(5).unwrap(), Status::Deleted);
        assert!(Status::from_code(0).is_err());
        assert!(Status::from_code(6).is_err());
    }

    #[test]
    fn test_status_code_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_default() {
        assert_eq!(Status::default(), Status::ReadyToPick);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(Status::ReadyToPick.as_str(), "ready_to_pick");
        assert_eq!(Status::ReadyToPick.display_name(), "Ready to Pick");
        assert_eq!(Status::Deleted.as_str(), "deleted");
        assert_eq!(Status::Deleted.to_string(), "Deleted");
    }

    #[test]
    fn test_status_is_startable() {
        assert!(Status::ReadyToPick.is_startable());
        assert!(Status::Blocked.is_startable());
        assert!(!Status::InProgress.is_startable());
        assert!(!Status::Completed.is_startable());
        assert!(!Status::Deleted.is_startable());
    }

    #[test]
    fn test_invalid_status_display() {
        let err = InvalidStatus(9);
        assert_eq!(err.to_string(), "invalid status code: 9 (must be 1-5)");
    }

    #[test]
    fn test_category_from_code() {
        assert_eq!(Category::from_code(1).unwrap(), Category::Work);
        assert_eq!(Category::from_code(2).unwrap(), Category::Leisure);
        assert!(Category::from_code(3).is_err());
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Work.as_str(), "work");
        assert_eq!(Category::Leisure.display_name(), "Leisure");
        assert_eq!(Category::Work.to_string(), "Work");
    }

    #[test]
    fn test_invalid_category_display() {
        let err = InvalidCategory(0);
        assert!(err.to_string().contains('0'));
    }

    #[test]
    fn test_task_is_deleted() {
        let mut task = Task {
            id: 1,
            name: "Write report".to_string(),
            status: Status::ReadyToPick,
            owner_id: 1,
            category: Category::Work,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };

        assert!(!task.is_deleted());
        task.status = Status::Deleted;
        assert!(task.is_deleted());
    }

    #[test]
    fn test_task_serialization() {
        let task = Task {
            id: 7,
            name: "Buy groceries".to_string(),
            status: Status::Blocked,
            owner_id: 3,
            category: Category::Leisure,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-02T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"blocked\""));
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_user_serialization() {
        let user = User {
            id: 1,
            name: "alice".to_string(),
            credential_hash: "ab$cd".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
