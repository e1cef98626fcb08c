//! Display implementation for taskflow messages.
//!
//! All user-facing text lives in this one `match`, so wording stays
//! consistent between commands and notifications:
//!
//! ```rust
//! use taskflow::libs::messages::Message;
//!
//! assert_eq!(Message::TaskCreated.to_string(), "Task created");
//! assert_eq!(Message::CompletionRate(50).to_string(), "Completion rate: 50%");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated => "Task created".to_string(),
            Message::TaskCreatedDescription => "Your task has been created successfully.".to_string(),
            Message::TaskCreateFailed => "Error creating task".to_string(),
            Message::TaskUpdated => "Task updated".to_string(),
            Message::TaskUpdatedDescription => "Your task has been updated successfully.".to_string(),
            Message::TaskUpdateFailed => "Error updating task".to_string(),
            Message::TaskDeleted => "Task deleted".to_string(),
            Message::TaskDeletedDescription => "Your task has been deleted successfully.".to_string(),
            Message::TaskDeleteFailed => "Error deleting task".to_string(),
            Message::TasksHeader => "Tasks".to_string(),
            Message::TasksProjectHeader(name) => format!("Tasks in '{}'", name),
            Message::TasksShown(shown, total) => format!("Showing {} of {} task(s)", shown, total),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::TasksAdjustFilters => "Try adjusting your filters".to_string(),
            Message::TasksGetStarted => "Get started by creating your first task: taskflow task add".to_string(),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskAlreadyCompleted(title) => format!("Task '{}' is already completed.", title),
            Message::TaskAdvanced(title, status) => format!("Task '{}' is now {}.", title, status),
            Message::ConfirmDeleteTask(title) => format!("Are you sure you want to delete task '{}'?", title),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::EditingTask(title) => format!("Editing task: {}", title),
            Message::SelectTask => "Select a task".to_string(),
            Message::SelectTaskToEdit => "Select a task to edit".to_string(),
            Message::SelectTaskAction => "What do you want to do?".to_string(),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskStatus => "Status".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD, empty for none)".to_string(),
            Message::PromptTaskProject => "Project".to_string(),
            Message::NoProjectOption => "No project".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated => "Project created".to_string(),
            Message::ProjectCreatedDescription => "Your project has been created successfully.".to_string(),
            Message::ProjectCreateFailed => "Error creating project".to_string(),
            Message::ProjectUpdated => "Project updated".to_string(),
            Message::ProjectUpdatedDescription => "Your project has been updated successfully.".to_string(),
            Message::ProjectUpdateFailed => "Error updating project".to_string(),
            Message::ProjectDeleted => "Project deleted".to_string(),
            Message::ProjectDeletedDescription => "Your project has been deleted successfully.".to_string(),
            Message::ProjectDeleteFailed => "Error deleting project".to_string(),
            Message::ProjectsHeader => "Projects".to_string(),
            Message::NoProjectsFound => "No projects yet. Create one with: taskflow project create".to_string(),
            Message::ProjectNotFound(id) => format!("Project '{}' not found.", id),
            Message::ConfirmDeleteProject(name) => format!("Are you sure you want to delete project '{}'?", name),
            Message::ConfirmDeleteProjectWithTasks(name, count) => format!(
                "Project '{}' has {} task(s) that will be deleted with it. Delete anyway?",
                name, count
            ),
            Message::EditingProject(name) => format!("Editing project: {}", name),
            Message::SelectProject => "Select a project".to_string(),
            Message::SelectProjectAction => "What do you want to do?".to_string(),
            Message::PromptProjectName => "Project name".to_string(),
            Message::PromptProjectDescription => "Description (optional)".to_string(),
            Message::ProjectCreatedOn(date) => format!("Created: {}", date),
            Message::ProjectUpdatedOn(date) => format!("Updated: {}", date),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader => "Dashboard".to_string(),
            Message::DashboardWelcome => "Welcome back! Here's your task overview.".to_string(),
            Message::CompletionRate(rate) => format!("Completion rate: {}%", rate),

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(month) => format!("Calendar for {}", month),
            Message::NoTasksWithDueDate => "No tasks are due this month.".to_string(),
            Message::UpcomingHeader => "Upcoming tasks".to_string(),
            Message::NoUpcomingTasks => "No tasks with due dates.".to_string(),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),
            Message::DueOverdue(date) => format!("{} (overdue)", date),

            // === AUTH MESSAGES ===
            Message::NotAuthenticated => "You are not logged in. Run: taskflow login".to_string(),
            Message::LoggedIn(email) => format!("Logged in as {}", email),
            Message::LoggedOut => "Logged out.".to_string(),
            Message::LoginFailed => "Invalid login credentials".to_string(),
            Message::WrongPassword(count) => format!("You entered the wrong password {} times!", count),
            Message::SessionExpired => "Your session has expired. Run: taskflow login".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration and cached credentials removed".to_string(),
            Message::ConfigModuleBackend => "Backend settings".to_string(),
            Message::BackendNotConfigured => "Backend is not configured. Run: taskflow init".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptBackendUrl => "Backend URL".to_string(),
            Message::PromptBackendAnonKey => "Backend public (anon) API key".to_string(),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled.".to_string(),
            Message::InvalidInput(details) => format!("Invalid input: {}", details),
        };
        write!(f, "{}", text)
    }
}
