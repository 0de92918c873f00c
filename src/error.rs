//! Error types for `taskbook`.

/// Errors that can occur in the task tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// A required field was empty or otherwise invalid.
    #[error("{0}")]
    Validation(String),

    /// The requested username is already taken.
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    /// Login failed. The message never distinguishes an unknown user
    /// from a wrong password.
    #[error("Invalid username or password")]
    Authentication,

    /// The task does not exist or belongs to another user. The message
    /// never distinguishes the two cases.
    #[error("Task not found or unauthorized")]
    NotFoundOrUnauthorized,

    /// A mutation was attempted on a deleted task.
    #[error("Cannot modify a deleted task")]
    DeletedTask,

    /// A task was resumed from a status that does not allow it.
    #[error("Task can only be resumed from Ready to Pick or Blocked status (current: {current})")]
    InvalidTransition {
        /// Human-readable name of the task's current status.
        current: String,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
