//! Path utilities for determining data storage locations.
//!
//! All data lives in `~/.taskbook/`: the SQLite database, the YAML config
//! file, and the debug event log.

use std::path::{Path, PathBuf};

/// The base directory name for taskbook data.
const DATA_DIR_NAME: &str = ".taskbook";

/// The database filename.
pub const DATABASE_FILENAME: &str = "tasks.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// The debug event log filename.
pub const EVENT_LOG_FILENAME: &str = "events.jsonl";

/// Get the base data directory.
///
/// Returns `~/.taskbook/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the default database path, `~/.taskbook/tasks.sqlite3`.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the config file path within a base directory.
#[must_use]
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILENAME)
}

/// Get the event log path within a base directory.
#[must_use]
pub fn event_log_path(base_dir: &Path) -> PathBuf {
    base_dir.join(EVENT_LOG_FILENAME)
}
