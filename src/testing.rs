//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit tests.

#![allow(dead_code)]

use crate::error::Result;
use crate::tasks::models::{Category, Status, Task, TaskDetails, TaskId, User, UserId};
use crate::tasks::store::{IdentityStore, TaskStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// In-memory implementation of [`IdentityStore`] and [`TaskStore`].
///
/// Used to test the service layer in isolation from `SQLite`. Clones share
/// the same underlying data, like clones of the production store share the
/// same database file. Timestamps are a zero-padded monotonic counter so
/// that lexicographic order matches mutation order, like the RFC 3339
/// strings the production store writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Rc<StoreData>,
}

#[derive(Debug, Default)]
struct StoreData {
    users: RefCell<Vec<User>>,
    tasks: RefCell<Vec<Task>>,
    tick: Cell<u64>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user directly, bypassing registration. Returns the new user.
    pub fn add_user(&self, name: &str) -> User {
        // Tests that only need identities should not care about hashes.
        self.create_user(name, "test$hash").unwrap_or_else(|_| unreachable!())
    }

    fn next_timestamp(&self) -> String {
        let tick = self.inner.tick.get() + 1;
        self.inner.tick.set(tick);
        format!("{tick:016}")
    }

    fn details_for(&self, task: &Task) -> TaskDetails {
        let owner_name = self
            .inner
            .users
            .borrow()
            .iter()
            .find(|u| u.id == task.owner_id)
            .map_or_else(|| "unknown".to_string(), |u| u.name.clone());

        TaskDetails {
            id: task.id,
            name: task.name.clone(),
            owner_name,
            status_name: task.status.display_name().to_string(),
            category_name: task.category.display_name().to_string(),
            created_at: task.created_at.clone(),
            updated_at: task.updated_at.clone(),
        }
    }

    fn list_where(&self, predicate: impl Fn(&Task) -> bool) -> Vec<TaskDetails> {
        let tasks = self.inner.tasks.borrow();
        let mut matching: Vec<&Task> = tasks.iter().filter(|t| predicate(t)).collect();
        matching.sort_by(|a, b| (&b.updated_at, b.id).cmp(&(&a.updated_at, a.id)));
        matching.into_iter().map(|t| self.details_for(t)).collect()
    }

    fn update_where(
        &self,
        id: TaskId,
        mutate: impl FnOnce(&mut Task),
    ) -> Result<Option<Task>> {
        let timestamp = self.next_timestamp();
        let mut tasks = self.inner.tasks.borrow_mut();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        mutate(task);
        task.updated_at = timestamp;
        Ok(Some(task.clone()))
    }
}

impl IdentityStore for MemoryStore {
    fn create_user(&self, name: &str, credential_hash: &str) -> Result<User> {
        let mut users = self.inner.users.borrow_mut();
        let user = User {
            id: users.len() as UserId + 1,
            name: name.to_string(),
            credential_hash: credential_hash.to_string(),
            created_at: self.next_timestamp(),
        };
        users.push(user.clone());
        Ok(user)
    }

    fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        Ok(self.inner.users.borrow().iter().find(|u| u.name == name).cloned())
    }

    fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.inner.users.borrow().iter().find(|u| u.id == id).cloned())
    }
}

impl TaskStore for MemoryStore {
    fn create_task(
        &self,
        name: &str,
        status: Status,
        owner: UserId,
        category: Category,
    ) -> Result<Task> {
        let timestamp = self.next_timestamp();
        let mut tasks = self.inner.tasks.borrow_mut();
        let task = Task {
            id: tasks.len() as TaskId + 1,
            name: name.to_string(),
            status,
            owner_id: owner,
            category,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.inner.tasks.borrow().iter().find(|t| t.id == id).cloned())
    }

    fn update_task_name(&self, id: TaskId, name: &str) -> Result<Option<Task>> {
        self.update_where(id, |task| task.name = name.to_string())
    }

    fn update_task_status(&self, id: TaskId, status: Status) -> Result<Option<Task>> {
        self.update_where(id, |task| task.status = status)
    }

    fn update_task_owner(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        self.update_where(id, |task| task.owner_id = owner)
    }

    fn list_active(&self, owner: UserId) -> Result<Vec<TaskDetails>> {
        Ok(self.list_where(|t| t.owner_id == owner && !t.is_deleted()))
    }

    fn list_by_status(&self, owner: UserId, status: Status) -> Result<Vec<TaskDetails>> {
        Ok(self.list_where(|t| t.owner_id == owner && t.status == status))
    }

    fn list_by_category(&self, owner: UserId, category: Category) -> Result<Vec<TaskDetails>> {
        Ok(self.list_where(|t| t.owner_id == owner && t.category == category && !t.is_deleted()))
    }

    fn list_startable(&self, owner: UserId) -> Result<Vec<TaskDetails>> {
        Ok(self.list_where(|t| t.owner_id == owner && t.status.is_startable()))
    }
}
