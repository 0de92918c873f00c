//! Task lifecycle service: the state machine and ownership authorization.
//!
//! Every mutating operation follows the same two-phase contract: fetch the
//! task and check ownership (a missing task and another user's task fail
//! identically, so callers cannot probe for tasks they do not own), then
//! apply the operation-specific guard and persist. `Deleted` is terminal:
//! no operation except another `delete` is accepted on a deleted task.

use crate::error::{Error, Result};
use crate::tasks::models::{Category, Status, Task, TaskDetails, TaskId, UserId};
use crate::tasks::store::TaskStore;

/// Task lifecycle service over a [`TaskStore`].
#[derive(Debug, Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Create a service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new task in `ReadyToPick` status.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is empty after trimming.
    pub fn create(&self, name: &str, owner: UserId, category: Category) -> Result<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Task name cannot be empty".to_string()));
        }

        self.store.create_task(name, Status::ReadyToPick, owner, category)
    }

    /// Rename a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`, `DeletedTask` if it has been deleted, or `Validation` if
    /// the new name is empty after trimming.
    pub fn rename(&self, task_id: TaskId, new_name: &str, actor: UserId) -> Result<Task> {
        let task = self.fetch_owned(task_id, actor)?;
        Self::guard_not_deleted(&task)?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(Error::Validation("Task name cannot be empty".to_string()));
        }

        self.store.update_task_name(task_id, new_name)?.ok_or(Error::NotFoundOrUnauthorized)
    }

    /// Transfer a task to another user.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`, or `DeletedTask` if it has been deleted.
    pub fn reassign(&self, task_id: TaskId, new_owner: UserId, actor: UserId) -> Result<Task> {
        let task = self.fetch_owned(task_id, actor)?;
        Self::guard_not_deleted(&task)?;

        self.store.update_task_owner(task_id, new_owner)?.ok_or(Error::NotFoundOrUnauthorized)
    }

    /// Resume a task into `InProgress`. Only `ReadyToPick` and `Blocked`
    /// tasks can be resumed.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`, `DeletedTask` if it has been deleted, or
    /// `InvalidTransition` if its current status does not allow resuming.
    pub fn resume(&self, task_id: TaskId, actor: UserId) -> Result<Task> {
        let task = self.fetch_owned(task_id, actor)?;
        Self::guard_not_deleted(&task)?;

        if !task.status.is_startable() {
            return Err(Error::InvalidTransition {
                current: task.status.display_name().to_string(),
            });
        }

        self.set_status(task_id, Status::InProgress)
    }

    /// Mark a task as completed.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`, or `DeletedTask` if it has been deleted.
    pub fn complete(&self, task_id: TaskId, actor: UserId) -> Result<Task> {
        let task = self.fetch_owned(task_id, actor)?;
        Self::guard_not_deleted(&task)?;
        self.set_status(task_id, Status::Completed)
    }

    /// Mark a task as blocked.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`, or `DeletedTask` if it has been deleted.
    pub fn block(&self, task_id: TaskId, actor: UserId) -> Result<Task> {
        let task = self.fetch_owned(task_id, actor)?;
        Self::guard_not_deleted(&task)?;
        self.set_status(task_id, Status::Blocked)
    }

    /// Soft-delete a task. Idempotent: deleting an already-deleted task
    /// succeeds and leaves it deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundOrUnauthorized` if the task is missing or not owned
    /// by `actor`.
    pub fn delete(&self, task_id: TaskId, actor: UserId) -> Result<Task> {
        self.fetch_owned(task_id, actor)?;
        self.set_status(task_id, Status::Deleted)
    }

    /// List the user's tasks that are not deleted, most recently updated
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn my_tasks(&self, user: UserId) -> Result<Vec<TaskDetails>> {
        self.store.list_active(user)
    }

    /// List the user's tasks with the given status. Asking for `Deleted`
    /// returns deleted tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn filter_by_status(&self, user: UserId, status: Status) -> Result<Vec<TaskDetails>> {
        self.store.list_by_status(user, status)
    }

    /// List the user's non-deleted tasks in the given category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn filter_by_category(&self, user: UserId, category: Category) -> Result<Vec<TaskDetails>> {
        self.store.list_by_category(user, category)
    }

    /// List the user's tasks that can be resumed (ready to pick or blocked).
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn startable_tasks(&self, user: UserId) -> Result<Vec<TaskDetails>> {
        self.store.list_startable(user)
    }

    /// Fetch a task and check that `actor` owns it. A missing task and a
    /// task owned by someone else produce the same error.
    fn fetch_owned(&self, task_id: TaskId, actor: UserId) -> Result<Task> {
        match self.store.get_task(task_id)? {
            Some(task) if task.owner_id == actor => Ok(task),
            _ => Err(Error::NotFoundOrUnauthorized),
        }
    }

    /// Reject mutations on deleted tasks.
    fn guard_not_deleted(task: &Task) -> Result<()> {
        if task.is_deleted() {
            return Err(Error::DeletedTask);
        }
        Ok(())
    }

    fn set_status(&self, task_id: TaskId, status: Status) -> Result<Task> {
        self.store.update_task_status(task_id, status)?.ok_or(Error::NotFoundOrUnauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use proptest::prelude::*;

    const ALICE: UserId = 1;
    const BOB: UserId = 2;

    fn service_with_users() -> TaskService<MemoryStore> {
        let store = MemoryStore::new();
        store.add_user("alice");
        store.add_user("bob");
        TaskService::new(store)
    }

    #[test]
    fn test_create_starts_ready_to_pick() {
        let service = service_with_users();
        let task = service.create("Write report", ALICE, Category::Work).unwrap();

        assert_eq!(task.status, Status::ReadyToPick);
        assert_eq!(task.owner_id, ALICE);
        assert_eq!(task.category, Category::Work);
    }

    #[test]
    fn test_create_trims_name() {
        let service = service_with_users();
        let task = service.create("  Write report  ", ALICE, Category::Work).unwrap();
        assert_eq!(task.name, "Write report");
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let service = service_with_users();
        assert!(matches!(
            service.create("", ALICE, Category::Work),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service.create("   ", ALICE, Category::Leisure),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_rename_own_task() {
        let service = service_with_users();
        let task = service.create("Old", ALICE, Category::Work).unwrap();

        let renamed = service.rename(task.id, "  New  ", ALICE).unwrap();
        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.status, Status::ReadyToPick);
    }

    #[test]
    fn test_rename_rejects_blank_name() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        assert!(matches!(
            service.rename(task.id, "   ", ALICE),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_missing_and_foreign_tasks_fail_identically() {
        let service = service_with_users();
        let task = service.create("Alice's task", ALICE, Category::Work).unwrap();

        let missing = service.rename(999, "x", BOB).unwrap_err();
        let foreign = service.rename(task.id, "x", BOB).unwrap_err();

        assert!(matches!(missing, Error::NotFoundOrUnauthorized));
        assert!(matches!(foreign, Error::NotFoundOrUnauthorized));
        assert_eq!(missing.to_string(), foreign.to_string());
    }

    #[test]
    fn test_ownership_checked_on_every_mutation() {
        let service = service_with_users();
        let task = service.create("Alice's task", ALICE, Category::Work).unwrap();

        assert!(matches!(service.rename(task.id, "x", BOB), Err(Error::NotFoundOrUnauthorized)));
        assert!(matches!(service.reassign(task.id, BOB, BOB), Err(Error::NotFoundOrUnauthorized)));
        assert!(matches!(service.resume(task.id, BOB), Err(Error::NotFoundOrUnauthorized)));
        assert!(matches!(service.complete(task.id, BOB), Err(Error::NotFoundOrUnauthorized)));
        assert!(matches!(service.block(task.id, BOB), Err(Error::NotFoundOrUnauthorized)));
        assert!(matches!(service.delete(task.id, BOB), Err(Error::NotFoundOrUnauthorized)));
    }

    #[test]
    fn test_reassign_transfers_ownership() {
        let service = service_with_users();
        let task = service.create("Handover", ALICE, Category::Work).unwrap();

        let reassigned = service.reassign(task.id, BOB, ALICE).unwrap();
        assert_eq!(reassigned.owner_id, BOB);
        assert_eq!(reassigned.status, Status::ReadyToPick);

        // Alice no longer owns it
        assert!(matches!(
            service.rename(task.id, "x", ALICE),
            Err(Error::NotFoundOrUnauthorized)
        ));
    }

    #[test]
    fn test_resume_from_ready_to_pick() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();

        let resumed = service.resume(task.id, ALICE).unwrap();
        assert_eq!(resumed.status, Status::InProgress);
    }

    #[test]
    fn test_resume_from_blocked() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        service.block(task.id, ALICE).unwrap();

        let resumed = service.resume(task.id, ALICE).unwrap();
        assert_eq!(resumed.status, Status::InProgress);
    }

    #[test]
    fn test_resume_from_in_progress_fails() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        service.resume(task.id, ALICE).unwrap();

        assert!(matches!(
            service.resume(task.id, ALICE),
            Err(Error::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_resume_from_completed_fails() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        service.complete(task.id, ALICE).unwrap();

        let err = service.resume(task.id, ALICE).unwrap_err();
        match err {
            Error::InvalidTransition { current } => assert_eq!(current, "Completed"),
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn test_resume_from_deleted_fails_with_deleted_task() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        service.delete(task.id, ALICE).unwrap();

        assert!(matches!(service.resume(task.id, ALICE), Err(Error::DeletedTask)));
    }

    #[test]
    fn test_complete_and_block_from_any_live_status() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();

        assert_eq!(service.block(task.id, ALICE).unwrap().status, Status::Blocked);
        assert_eq!(service.complete(task.id, ALICE).unwrap().status, Status::Completed);
        // Completed tasks can still be blocked again
        assert_eq!(service.block(task.id, ALICE).unwrap().status, Status::Blocked);
    }

    #[test]
    fn test_delete_is_terminal() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();
        let deleted = service.delete(task.id, ALICE).unwrap();
        assert_eq!(deleted.status, Status::Deleted);

        assert!(matches!(service.rename(task.id, "x", ALICE), Err(Error::DeletedTask)));
        assert!(matches!(service.reassign(task.id, BOB, ALICE), Err(Error::DeletedTask)));
        assert!(matches!(service.resume(task.id, ALICE), Err(Error::DeletedTask)));
        assert!(matches!(service.complete(task.id, ALICE), Err(Error::DeletedTask)));
        assert!(matches!(service.block(task.id, ALICE), Err(Error::DeletedTask)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let service = service_with_users();
        let task = service.create("Task", ALICE, Category::Work).unwrap();

        service.delete(task.id, ALICE).unwrap();
        let again = service.delete(task.id, ALICE).unwrap();
        assert_eq!(again.status, Status::Deleted);
    }

    #[test]
    fn test_my_tasks_excludes_deleted() {
        let service = service_with_users();
        let keep = service.create("Keep", ALICE, Category::Work).unwrap();
        let gone = service.create("Gone", ALICE, Category::Work).unwrap();
        service.delete(gone.id, ALICE).unwrap();

        let tasks = service.my_tasks(ALICE).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);
    }

    #[test]
    fn test_filter_by_status_finds_deleted() {
        let service = service_with_users();
        let task = service.create("Gone", ALICE, Category::Work).unwrap();
        service.delete(task.id, ALICE).unwrap();

        let deleted = service.filter_by_status(ALICE, Status::Deleted).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].id, task.id);
    }

    #[test]
    fn test_filter_by_category() {
        let service = service_with_users();
        service.create("Desk", ALICE, Category::Work).unwrap();
        let hobby = service.create("Hobby", ALICE, Category::Leisure).unwrap();

        let leisure = service.filter_by_category(ALICE, Category::Leisure).unwrap();
        assert_eq!(leisure.len(), 1);
        assert_eq!(leisure[0].id, hobby.id);
    }

    #[test]
    fn test_startable_tasks() {
        let service = service_with_users();
        let ready = service.create("Ready", ALICE, Category::Work).unwrap();
        let blocked = service.create("Blocked", ALICE, Category::Work).unwrap();
        service.block(blocked.id, ALICE).unwrap();
        let running = service.create("Running", ALICE, Category::Work).unwrap();
        service.resume(running.id, ALICE).unwrap();

        let startable = service.startable_tasks(ALICE).unwrap();
        let ids: Vec<_> = startable.iter().map(|t| t.id).collect();
        assert!(ids.contains(&ready.id));
        assert!(ids.contains(&blocked.id));
        assert!(!ids.contains(&running.id));
    }

    #[test]
    fn test_full_lifecycle() {
        let service = service_with_users();

        let task = service.create("Write report", ALICE, Category::Work).unwrap();
        assert_eq!(task.status, Status::ReadyToPick);

        assert_eq!(service.block(task.id, ALICE).unwrap().status, Status::Blocked);
        assert_eq!(service.resume(task.id, ALICE).unwrap().status, Status::InProgress);
        assert_eq!(service.complete(task.id, ALICE).unwrap().status, Status::Completed);
        assert_eq!(service.delete(task.id, ALICE).unwrap().status, Status::Deleted);

        assert!(matches!(
            service.rename(task.id, "Write report v2", ALICE),
            Err(Error::DeletedTask)
        ));
    }

    /// Operations a caller may attempt on an existing task.
    #[derive(Debug, Clone)]
    enum Op {
        Rename,
        Reassign,
        Resume,
        Complete,
        Block,
        Delete,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Rename),
            Just(Op::Reassign),
            Just(Op::Resume),
            Just(Op::Complete),
            Just(Op::Block),
            Just(Op::Delete),
        ]
    }

    proptest! {
        /// Once a task is deleted, no sequence of further operations can
        /// change its status, name, or owner.
        #[test]
        fn prop_deleted_is_terminal(ops in prop::collection::vec(op_strategy(), 0..16)) {
            let service = service_with_users();
            let task = service.create("Task", ALICE, Category::Work).unwrap();
            service.delete(task.id, ALICE).unwrap();

            for op in ops {
                let result = match op {
                    Op::Rename => service.rename(task.id, "changed", ALICE),
                    Op::Reassign => service.reassign(task.id, BOB, ALICE),
                    Op::Resume => service.resume(task.id, ALICE),
                    Op::Complete => service.complete(task.id, ALICE),
                    Op::Block => service.block(task.id, ALICE),
                    Op::Delete => service.delete(task.id, ALICE),
                };

                match op {
                    Op::Delete => prop_assert!(result.is_ok()),
                    _ => prop_assert!(matches!(result, Err(Error::DeletedTask))),
                }

                let current = service.store.get_task(task.id).unwrap().unwrap();
                prop_assert_eq!(current.status, Status::Deleted);
                prop_assert_eq!(&current.name, "Task");
                prop_assert_eq!(current.owner_id, ALICE);
            }
        }
    }
}
