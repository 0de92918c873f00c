//! Debug event logging.
//!
//! When `debug_logging` is enabled in the config, every front-end action is
//! appended as a JSONL line to `events.jsonl` in the data directory. This
//! allows inspecting exactly what a session did.
//!
//! Errors are silently ignored; logging must never break a session.

use crate::config::AppConfig;
use crate::paths;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Log an event if debug logging is enabled in the given base directory.
pub fn log_event_in(event: &str, detail: &str, base_dir: &Path) {
    let Ok(Some(config)) = AppConfig::load_from(base_dir) else {
        return;
    };

    if !config.debug_logging {
        return;
    }

    write_event(event, detail, base_dir);
}

/// Append the event to the log file, creating the directory if needed.
fn write_event(event: &str, detail: &str, base_dir: &Path) {
    if std::fs::create_dir_all(base_dir).is_err() {
        return;
    }

    let entry = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "event": event,
        "detail": detail,
    });

    let log_path = paths::event_log_path(base_dir);
    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}
