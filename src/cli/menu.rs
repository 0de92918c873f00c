//! The interactive menu loop.

use crate::auth::AuthService;
use crate::error::Result;
use crate::event_log;
use crate::tasks::models::{Category, Status, TaskDetails, User};
use crate::tasks::store::{IdentityStore, TaskStore};
use crate::tasks::TaskService;
use crate::templates;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tera::Context;

/// Interactive menu session over generic reader/writer handles.
///
/// Every service failure is rendered as a one-line `Error: <message>` and
/// the session continues; only I/O failures on the terminal itself end the
/// loop with an error. End of input ends the session cleanly.
pub struct Menu<S, R, W> {
    auth: AuthService<S>,
    tasks: TaskService<S>,
    input: R,
    output: W,
    data_dir: PathBuf,
}

impl<S, R, W> Menu<S, R, W>
where
    S: IdentityStore + TaskStore,
    R: BufRead,
    W: Write,
{
    /// Create a session over the given services and I/O handles.
    pub const fn new(
        auth: AuthService<S>,
        tasks: TaskService<S>,
        input: R,
        output: W,
        data_dir: PathBuf,
    ) -> Self {
        Self { auth, tasks, input, output, data_dir }
    }

    /// Run the session until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O or template rendering fails.
    pub fn run(&mut self) -> Result<()> {
        let intro = templates::render("messages/intro.tera", &Context::new())?;
        writeln!(self.output, "{intro}")?;

        loop {
            let menu = templates::render("messages/auth_menu.tera", &Context::new())?;
            writeln!(self.output, "{menu}")?;

            let Some(choice) = self.prompt("Choose: ")? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn register(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(());
        };

        match self.auth.register(&username, &password) {
            Ok(user) => {
                event_log::log_event_in("register", &user.name, &self.data_dir);
                writeln!(self.output, "Registration successful!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(());
        };

        match self.auth.authenticate(&username, &password) {
            Ok(user) => {
                event_log::log_event_in("login", &user.name, &self.data_dir);
                writeln!(self.output, "Welcome, {}!", user.name)?;
                self.task_menu(&user)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn task_menu(&mut self, user: &User) -> Result<()> {
        loop {
            let mut context = Context::new();
            context.insert("username", &user.name);
            let menu = templates::render("messages/task_menu.tera", &context)?;
            writeln!(self.output, "{menu}")?;

            let Some(choice) = self.prompt("Choose: ")? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => self.add_task(user)?,
                "2" => self.edit_task(user)?,
                "3" => self.resume_task(user)?,
                "4" => self.complete_task(user)?,
                "5" => self.block_task(user)?,
                "6" => self.delete_task(user)?,
                "7" => self.view_tasks(user)?,
                "8" => self.filter_tasks(user)?,
                "0" => {
                    event_log::log_event_in("logout", &user.name, &self.data_dir);
                    writeln!(self.output, "Logged out.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn add_task(&mut self, user: &User) -> Result<()> {
        let Some(name) = self.prompt("Task name: ")? else {
            return Ok(());
        };

        writeln!(self.output, "Categories: 1=Work, 2=Leisure")?;
        let Some(code) = self.prompt_number("Category ID: ")? else {
            return Ok(());
        };
        let category = match Category::from_code(code) {
            Ok(c) => c,
            Err(e) => return self.report(&e),
        };

        match self.tasks.create(&name, user.id, category) {
            Ok(task) => {
                event_log::log_event_in("add_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task added successfully!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn edit_task(&mut self, user: &User) -> Result<()> {
        let Some(task_id) = self.prompt_number("Task ID: ")? else {
            return Ok(());
        };
        let Some(new_name) = self.prompt("New task name: ")? else {
            return Ok(());
        };

        match self.tasks.rename(task_id, &new_name, user.id) {
            Ok(task) => {
                event_log::log_event_in("edit_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task updated successfully!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn resume_task(&mut self, user: &User) -> Result<()> {
        let startable = match self.tasks.startable_tasks(user.id) {
            Ok(tasks) => tasks,
            Err(e) => return self.report(&e),
        };

        if startable.is_empty() {
            writeln!(
                self.output,
                "(No startable tasks. Only Ready to Pick or Blocked tasks can be started.)"
            )?;
            return Ok(());
        }

        self.display_tasks(&startable, "Start/Resume Task")?;
        let Some(task_id) = self.prompt_number("Task ID: ")? else {
            return Ok(());
        };

        match self.tasks.resume(task_id, user.id) {
            Ok(task) => {
                event_log::log_event_in("resume_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task marked as in progress!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn complete_task(&mut self, user: &User) -> Result<()> {
        let Some(task_id) = self.prompt_number("Task ID: ")? else {
            return Ok(());
        };

        match self.tasks.complete(task_id, user.id) {
            Ok(task) => {
                event_log::log_event_in("complete_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task marked as completed!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn block_task(&mut self, user: &User) -> Result<()> {
        let Some(task_id) = self.prompt_number("Task ID: ")? else {
            return Ok(());
        };

        match self.tasks.block(task_id, user.id) {
            Ok(task) => {
                event_log::log_event_in("block_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task marked as blocked!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn delete_task(&mut self, user: &User) -> Result<()> {
        let Some(task_id) = self.prompt_number("Task ID: ")? else {
            return Ok(());
        };

        let Some(confirm) = self.prompt("Are you sure you want to delete this task? (y/n): ")?
        else {
            return Ok(());
        };
        if !confirm.trim().eq_ignore_ascii_case("y") {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        match self.tasks.delete(task_id, user.id) {
            Ok(task) => {
                event_log::log_event_in("delete_task", &task.name, &self.data_dir);
                writeln!(self.output, "Task deleted successfully!")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn view_tasks(&mut self, user: &User) -> Result<()> {
        match self.tasks.my_tasks(user.id) {
            Ok(tasks) => self.display_tasks(&tasks, "My Tasks"),
            Err(e) => self.report(&e),
        }
    }

    fn filter_tasks(&mut self, user: &User) -> Result<()> {
        writeln!(self.output, "Filter by: 1=Status, 2=Category")?;
        let Some(choice) = self.prompt("Choose: ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                writeln!(
                    self.output,
                    "Status: 1=Ready to Pick, 2=In Progress, 3=Blocked, 4=Completed, 5=Deleted"
                )?;
                let Some(code) = self.prompt_number("Status ID: ")? else {
                    return Ok(());
                };
                let status = match Status::from_code(code) {
                    Ok(s) => s,
                    Err(e) => return self.report(&e),
                };

                match self.tasks.filter_by_status(user.id, status) {
                    Ok(tasks) => self.display_tasks(&tasks, "Filtered Tasks")?,
                    Err(e) => self.report(&e)?,
                }
            }
            "2" => {
                writeln!(self.output, "Categories: 1=Work, 2=Leisure")?;
                let Some(code) = self.prompt_number("Category ID: ")? else {
                    return Ok(());
                };
                let category = match Category::from_code(code) {
                    Ok(c) => c,
                    Err(e) => return self.report(&e),
                };

                match self.tasks.filter_by_category(user.id, category) {
                    Ok(tasks) => self.display_tasks(&tasks, "Filtered Tasks")?,
                    Err(e) => self.report(&e)?,
                }
            }
            _ => writeln!(self.output, "Invalid choice.")?,
        }
        Ok(())
    }

    fn display_tasks(&mut self, tasks: &[TaskDetails], title: &str) -> Result<()> {
        if tasks.is_empty() {
            writeln!(self.output, "No tasks found.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- {title} ---")?;
        for task in tasks {
            writeln!(
                self.output,
                "[{}] {} | {} | Status={} | Category={} | Created={} | Updated={}",
                task.id,
                task.owner_name,
                task.name,
                task.status_name,
                task.category_name,
                task.created_at,
                task.updated_at,
            )?;
        }
        Ok(())
    }

    /// Print a prompt and read one line. `Ok(None)` means end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Prompt for a number. Reports bad input and returns `Ok(None)` so the
    /// caller falls back to the menu.
    fn prompt_number(&mut self, message: &str) -> Result<Option<i64>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(None);
        };

        match line.trim().parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                Ok(None)
            }
        }
    }

    /// Render a failure as a one-line error without ending the session.
    fn report(&mut self, err: &dyn std::fmt::Display) -> Result<()> {
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }
}
