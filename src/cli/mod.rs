//! Interactive command-line interface.
//!
//! The binary runs a numbered-menu prompt loop with two states: an
//! unauthenticated menu (register / login / exit) and a per-user task menu.
//! All text I/O goes through generic reader/writer handles so the loop can
//! be driven by tests.

mod menu;

pub use menu::Menu;

use crate::auth::AuthService;
use crate::config;
use crate::error::Result;
use crate::paths;
use crate::tasks::{SqliteStore, TaskService};
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// A command-line to-do tracker with per-user accounts.
///
/// Data lives in `~/.taskbook/` unless overridden: `config.yaml` for
/// settings, `tasks.sqlite3` for the database.
#[derive(Parser, Debug)]
#[command(name = "taskbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file path (overrides config and the default location)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Data directory for config and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolve the data directory from the flag or the home-based default.
    fn resolve_data_dir(&self) -> Result<PathBuf> {
        self.data_dir.clone().or_else(paths::data_dir).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine home directory").into()
        })
    }
}

/// Run the interactive session on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the configuration or database cannot be opened, or
/// if terminal I/O fails. Service-level failures are rendered inside the
/// loop and do not end the session.
pub fn run(cli: &Cli) -> Result<()> {
    let data_dir = cli.resolve_data_dir()?;
    let app_config = config::ensure_config_in(&data_dir)?;

    let db_path = cli
        .db
        .clone()
        .or_else(|| app_config.database_path.clone())
        .unwrap_or_else(|| data_dir.join(paths::DATABASE_FILENAME));

    let store = SqliteStore::new(db_path)?;
    let auth = AuthService::new(store.clone());
    let tasks = TaskService::new(store);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Menu::new(auth, tasks, stdin, stdout, data_dir).run()
}
