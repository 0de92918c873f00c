//! Store traits and the `SQLite` implementation.

use crate::error::Result;
use crate::tasks::models::{Category, Status, Task, TaskDetails, TaskId, User, UserId};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Trait for user persistence operations.
///
/// Pure storage: absence is `Ok(None)`, never an error. Callers decide
/// what "not found" means.
#[allow(clippy::missing_errors_doc)]
pub trait IdentityStore {
    /// Create a new user with the given name and credential digest.
    fn create_user(&self, name: &str, credential_hash: &str) -> Result<User>;

    /// Find a user by exact (case-sensitive) name.
    fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Find a user by ID.
    fn find_user_by_id(&self, id: UserId) -> Result<Option<User>>;
}

/// Trait for task persistence operations.
///
/// Pure storage: no business rules. Update methods return `Ok(None)` when
/// the row does not exist; list methods return rows joined with the owner's
/// username and the display names from the lookup tables, ordered by
/// `updated_date` descending.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Insert a new task and return the stored row.
    fn create_task(
        &self,
        name: &str,
        status: Status,
        owner: UserId,
        category: Category,
    ) -> Result<Task>;

    /// Get a task by ID.
    fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Set a task's name and refresh its update timestamp.
    fn update_task_name(&self, id: TaskId, name: &str) -> Result<Option<Task>>;

    /// Set a task's status and refresh its update timestamp.
    fn update_task_status(&self, id: TaskId, status: Status) -> Result<Option<Task>>;

    /// Set a task's owner and refresh its update timestamp.
    fn update_task_owner(&self, id: TaskId, owner: UserId) -> Result<Option<Task>>;

    /// List a user's tasks that are not deleted.
    fn list_active(&self, owner: UserId) -> Result<Vec<TaskDetails>>;

    /// List a user's tasks with the given status, deleted included.
    fn list_by_status(&self, owner: UserId, status: Status) -> Result<Vec<TaskDetails>>;

    /// List a user's non-deleted tasks in the given category.
    fn list_by_category(&self, owner: UserId, category: Category) -> Result<Vec<TaskDetails>>;

    /// List a user's tasks that can be resumed (ready to pick or blocked).
    fn list_startable(&self, owner: UserId) -> Result<Vec<TaskDetails>>;
}

/// Shared SELECT for list queries, joined against the lookup tables.
const LIST_SELECT: &str = "SELECT t.id, t.task_name, u.name, s.display_name, c.display_name,
            t.created_date, t.updated_date
     FROM tasks t
     JOIN users u ON t.user_id = u.id
     JOIN status s ON t.status_id = s.id
     JOIN category c ON t.category_id = c.id";

/// SQLite-backed store implementing both [`IdentityStore`] and [`TaskStore`].
///
/// Each operation opens a fresh connection scoped to the call, so the
/// connection is always released whether the query succeeds or fails.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create a store at the given database path, initializing the schema
    /// and seeding the status/category lookup tables if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            -- Static status lookup table
            CREATE TABLE IF NOT EXISTS status (
                id INTEGER PRIMARY KEY,
                status_name TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL
            );

            -- Static category lookup table
            CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                category_name TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL
            );

            -- Registered users
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                credential_hash TEXT NOT NULL,
                created_date TEXT NOT NULL
            );

            -- Tasks; deletion is a status value, rows are never removed
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_name TEXT NOT NULL,
                status_id INTEGER NOT NULL REFERENCES status(id),
                user_id INTEGER NOT NULL REFERENCES users(id),
                category_id INTEGER NOT NULL REFERENCES category(id),
                created_date TEXT NOT NULL,
                updated_date TEXT NOT NULL
            );

            -- Indexes for the per-user list queries
            CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_user_status ON tasks(user_id, status_id);
            ",
        )?;

        for status in Status::ALL {
            conn.execute(
                "INSERT OR IGNORE INTO status (id, status_name, display_name) VALUES (?1, ?2, ?3)",
                params![status.code(), status.as_str(), status.display_name()],
            )?;
        }

        for category in Category::ALL {
            conn.execute(
                "INSERT OR IGNORE INTO category (id, category_name, display_name)
                 VALUES (?1, ?2, ?3)",
                params![category.code(), category.as_str(), category.display_name()],
            )?;
        }

        Ok(())
    }

    /// Current timestamp, RFC 3339 with microsecond precision so that
    /// lexicographic order matches chronological order.
    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Parse a user from a row.
    fn parse_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            credential_hash: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    /// Parse a task from a row.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status_code: i64 = row.get(2)?;
        let category_code: i64 = row.get(4)?;

        Ok(Task {
            id: row.get(0)?,
            name: row.get(1)?,
            status: Status::from_code(status_code).unwrap_or_default(),
            owner_id: row.get(3)?,
            category: Category::from_code(category_code).unwrap_or(Category::Work),
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    /// Parse a joined list row.
    fn parse_details(row: &rusqlite::Row) -> rusqlite::Result<TaskDetails> {
        Ok(TaskDetails {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_name: row.get(2)?,
            status_name: row.get(3)?,
            category_name: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    /// Fetch a task by id on an existing connection.
    fn get_task_on(conn: &Connection, id: TaskId) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                "SELECT id, task_name, status_id, user_id, category_id, created_date, updated_date
                 FROM tasks WHERE id = ?1",
                params![id],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }
}

impl IdentityStore for SqliteStore {
    fn create_user(&self, name: &str, credential_hash: &str) -> Result<User> {
        let conn = self.open()?;
        let now = Self::now();

        conn.execute(
            "INSERT INTO users (name, credential_hash, created_date) VALUES (?1, ?2, ?3)",
            params![name, credential_hash, now],
        )?;

        let user = conn.query_row(
            "SELECT id, name, credential_hash, created_date FROM users WHERE id = ?1",
            params![conn.last_insert_rowid()],
            Self::parse_user,
        )?;

        Ok(user)
    }

    fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.open()?;
        let user = conn
            .query_row(
                "SELECT id, name, credential_hash, created_date FROM users WHERE name = ?1",
                params![name],
                Self::parse_user,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.open()?;
        let user = conn
            .query_row(
                "SELECT id, name, credential_hash, created_date FROM users WHERE id = ?1",
                params![id],
                Self::parse_user,
            )
            .optional()?;
        Ok(user)
    }
}

impl TaskStore for SqliteStore {
    fn create_task(
        &self,
        name: &str,
        status: Status,
        owner: UserId,
        category: Category,
    ) -> Result<Task> {
        let conn = self.open()?;
        let now = Self::now();

        conn.execute(
            "INSERT INTO tasks (task_name, status_id, user_id, category_id, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![name, status.code(), owner, category.code(), now],
        )?;

        let task = Self::get_task_on(&conn, conn.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let conn = self.open()?;
        Self::get_task_on(&conn, id)
    }

    fn update_task_name(&self, id: TaskId, name: &str) -> Result<Option<Task>> {
        let conn = self.open()?;
        let rows = conn.execute(
            "UPDATE tasks SET task_name = ?1, updated_date = ?2 WHERE id = ?3",
            params![name, Self::now(), id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_task_on(&conn, id)
    }

    fn update_task_status(&self, id: TaskId, status: Status) -> Result<Option<Task>> {
        let conn = self.open()?;
        let rows = conn.execute(
            "UPDATE tasks SET status_id = ?1, updated_date = ?2 WHERE id = ?3",
            params![status.code(), Self::now(), id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_task_on(&conn, id)
    }

    fn update_task_owner(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        let conn = self.open()?;
        let rows = conn.execute(
            "UPDATE tasks SET user_id = ?1, updated_date = ?2 WHERE id = ?3",
            params![owner, Self::now(), id],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Self::get_task_on(&conn, id)
    }

    fn list_active(&self, owner: UserId) -> Result<Vec<TaskDetails>> {
        let conn = self.open()?;
        let sql = format!(
            "{LIST_SELECT}
             WHERE t.user_id = ?1 AND t.status_id <> ?2
             ORDER BY t.updated_date DESC, t.id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![owner, Status::Deleted.code()], Self::parse_details)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn list_by_status(&self, owner: UserId, status: Status) -> Result<Vec<TaskDetails>> {
        let conn = self.open()?;
        let sql = format!(
            "{LIST_SELECT}
             WHERE t.user_id = ?1 AND t.status_id = ?2
             ORDER BY t.updated_date DESC, t.id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![owner, status.code()], Self::parse_details)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn list_by_category(&self, owner: UserId, category: Category) -> Result<Vec<TaskDetails>> {
        let conn = self.open()?;
        let sql = format!(
            "{LIST_SELECT}
             WHERE t.user_id = ?1 AND t.category_id = ?2 AND t.status_id <> ?3
             ORDER BY t.updated_date DESC, t.id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(
                params![owner, category.code(), Status::Deleted.code()],
                Self::parse_details,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn list_startable(&self, owner: UserId) -> Result<Vec<TaskDetails>> {
        let conn = self.open()?;
        let sql = format!(
            "{LIST_SELECT}
             WHERE t.user_id = ?1 AND t.status_id IN (?2, ?3)
             ORDER BY t.updated_date DESC, t.id DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(
                params![owner, Status::ReadyToPick.code(), Status::Blocked.code()],
                Self::parse_details,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}
