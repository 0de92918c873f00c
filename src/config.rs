//! Configuration management.
//!
//! This module handles the `config.yaml` file in the data directory, which
//! stores the optional database path override and the debug logging flag.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Database path override. `None` means the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Whether to append front-end events to the debug event log.
    #[serde(default)]
    pub debug_logging: bool,
}

impl AppConfig {
    /// Load config from a base directory, returning `None` if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = paths::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a base directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(base_dir)?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(paths::config_path(base_dir), content)?;
        Ok(())
    }
}

/// Ensure config exists in a base directory, creating it with defaults if
/// not. Returns the config (either loaded or newly created).
///
/// # Errors
///
/// Returns an error if config cannot be loaded or saved.
pub fn ensure_config_in(base_dir: &Path) -> Result<AppConfig> {
    if let Some(config) = AppConfig::load_from(base_dir)? {
        return Ok(config);
    }

    let config = AppConfig::default();
    config.save_to(base_dir)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = AppConfig::default();
        assert!(config.database_path.is_none());
        assert!(!config.debug_logging);
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load_from(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/custom.sqlite3")),
            debug_logging: true,
        };
        config.save_to(dir.path()).unwrap();

        let loaded = AppConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_yaml_format() {
        let dir = TempDir::new().unwrap();

        let config = AppConfig { database_path: None, debug_logging: true };
        config.save_to(dir.path()).unwrap();

        let content = std::fs::read_to_string(paths::config_path(dir.path())).unwrap();
        assert!(content.contains("debug_logging: true"));
        assert!(!content.contains("database_path"));
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(paths::config_path(dir.path()), "debug_logging: [not a bool").unwrap();

        assert!(AppConfig::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_ensure_config_creates_default() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("data");

        let config = ensure_config_in(&base).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(paths::config_path(&base).exists());
    }

    #[test]
    fn test_ensure_config_loads_existing() {
        let dir = TempDir::new().unwrap();

        let existing = AppConfig { database_path: None, debug_logging: true };
        existing.save_to(dir.path()).unwrap();

        let config = ensure_config_in(dir.path()).unwrap();
        assert!(config.debug_logging);
    }
}
