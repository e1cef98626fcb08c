//! Entity schemas for user-entered form data.
//!
//! Prompts and command-line flags produce raw strings. Each form holds those
//! strings as entered and `validate` turns them into a typed payload, or a
//! [`ValidationError`] before anything is sent to the backend.
//!
//! | Field         | Task     | Project  |
//! |---------------|----------|----------|
//! | title / name  | required | required |
//! | description   | optional | optional |
//! | status        | required, default `todo` | - |
//! | priority      | required, default `medium` | - |
//! | due date      | optional, `YYYY-MM-DD` | - |

use super::project::{NewProjectInput, Project, ProjectPatch};
use super::task::{NewTaskInput, Task, TaskPatch, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Unknown status '{0}', expected one of: todo, in-progress, completed")]
    Status(String),
    #[error("Unknown priority '{0}', expected one of: low, medium, high")]
    Priority(String),
    #[error("Invalid due date '{0}', expected YYYY-MM-DD")]
    DueDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::default().to_string(),
            priority: TaskPriority::default().to_string(),
            due_date: String::new(),
        }
    }
}

impl TaskForm {
    /// Prefills the form from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.to_string(),
            priority: task.priority.to_string(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewTaskInput, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required("Title"));
        }
        Ok(NewTaskInput {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            due_date: parse_date(&self.due_date)?,
            project_id: None,
        })
    }

    /// Validates the form and keeps only the fields that differ from `task`.
    /// Stored text is compared trimmed, the way the form submits it.
    pub fn patch_for(&self, task: &Task) -> Result<TaskPatch, ValidationError> {
        let input = self.validate()?;
        Ok(TaskPatch {
            title: (input.title != task.title.trim()).then_some(input.title),
            description: (input.description != task.description.trim()).then_some(input.description),
            status: (input.status != task.status).then_some(input.status),
            priority: (input.priority != task.priority).then_some(input.priority),
            due_date: (input.due_date != task.due_date).then_some(input.due_date),
            project_id: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewProjectInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("Name"));
        }
        let description = self.description.trim();
        Ok(NewProjectInput {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub fn patch_for(&self, project: &Project) -> Result<ProjectPatch, ValidationError> {
        let input = self.validate()?;
        Ok(ProjectPatch {
            name: (input.name != project.name.trim()).then_some(input.name),
            description: (input.description.as_deref() != stored_description(project)).then_some(input.description),
        })
    }
}

fn stored_description(project: &Project) -> Option<&str> {
    project.description.as_deref().map(str::trim).filter(|description| !description.is_empty())
}

pub fn parse_status(value: &str) -> Result<TaskStatus, ValidationError> {
    value.parse().map_err(ValidationError::Status)
}

pub fn parse_priority(value: &str) -> Result<TaskPriority, ValidationError> {
    value.parse().map_err(ValidationError::Priority)
}

/// Parses an optional `YYYY-MM-DD` date; blank means no date.
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::DueDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_form_defaults() {
        let form = TaskForm {
            title: "  Write spec ".to_string(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.title, "Write spec");
        assert_eq!(input.status, TaskStatus::Todo);
        assert_eq!(input.priority, TaskPriority::Medium);
        assert_eq!(input.due_date, None);
    }

    #[test]
    fn test_task_form_rejects_bad_fields() {
        let blank = TaskForm::default();
        assert_eq!(blank.validate(), Err(ValidationError::Required("Title")));

        let bad_status = TaskForm {
            title: "x".to_string(),
            status: "done".to_string(),
            ..Default::default()
        };
        assert_eq!(bad_status.validate(), Err(ValidationError::Status("done".to_string())));

        let bad_date = TaskForm {
            title: "x".to_string(),
            due_date: "14/03/2025".to_string(),
            ..Default::default()
        };
        assert_eq!(bad_date.validate(), Err(ValidationError::DueDate("14/03/2025".to_string())));
    }

    #[test]
    fn test_project_form_blank_description_is_none() {
        let form = ProjectForm {
            name: "Launch".to_string(),
            description: "   ".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.description, None);
        assert_eq!(ProjectForm::default().validate(), Err(ValidationError::Required("Name")));
    }

    #[test]
    fn test_untouched_form_with_padded_text_has_no_changes() {
        let now = chrono::Utc::now();
        let task = Task {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            project_id: None,
            title: "Write spec ".to_string(),
            description: "  draft first\n".to_string(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 14),
            created_at: now,
            updated_at: now,
        };
        assert!(TaskForm::from_task(&task).patch_for(&task).unwrap().is_empty());

        let project = Project {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            name: "Launch".to_string(),
            description: Some(" Q3 release ".to_string()),
            created_at: now,
            updated_at: now,
        };
        assert!(ProjectForm::from_project(&project).patch_for(&project).unwrap().is_empty());

        let edited = TaskForm {
            description: "final".to_string(),
            ..TaskForm::from_task(&task)
        };
        let patch = edited.patch_for(&task).unwrap();
        assert_eq!(patch.description.as_deref(), Some("final"));
        assert_eq!(patch.title, None);
    }
}
