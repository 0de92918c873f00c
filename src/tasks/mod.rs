//! Task tracking: domain models, store traits, and the lifecycle service.
//!
//! # Example
//!
//! ```no_run
//! use taskbook::tasks::{Category, SqliteStore, TaskService};
//!
//! let store = SqliteStore::new("/tmp/tasks.sqlite3").unwrap();
//! let tasks = TaskService::new(store);
//!
//! // Create a task and walk it through its lifecycle
//! let owner = 1;
//! let task = tasks.create("Write report", owner, Category::Work).unwrap();
//! tasks.resume(task.id, owner).unwrap();
//! tasks.complete(task.id, owner).unwrap();
//! ```

pub mod models;
pub mod service;
pub mod store;

pub use models::{
    Category, InvalidCategory, InvalidStatus, Status, Task, TaskDetails, TaskId, User, UserId,
};
pub use service::TaskService;
pub use store::{IdentityStore, SqliteStore, TaskStore};
