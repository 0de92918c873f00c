//! # `taskbook`
//!
//! A command-line to-do tracker with per-user accounts backed by `SQLite`.
//!
//! Users register and log in, then create, rename, reassign, soft-delete,
//! and walk tasks through a small lifecycle state machine (ready to pick,
//! in progress, blocked, completed, deleted). Every mutation is authorized
//! against the task's owner.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_log;
pub mod paths;
pub mod tasks;
pub mod templates;
pub mod testing;

pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
