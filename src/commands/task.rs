use super::Connection;
use crate::{
    data::Tasks,
    libs::{
        filter::{Selector, TaskFilter},
        form::TaskForm,
        messages::Message,
        project::Project,
        task::{Task, TaskPriority, TaskStatus},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
    store::rest::RestStore,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Show tasks, optionally filtered
    List {
        /// Only tasks of this project
        #[arg(short, long)]
        project: Option<String>,
        /// Case-insensitive text matched against title and description
        #[arg(short, long, default_value = "")]
        search: String,
        /// todo, in-progress, completed or all
        #[arg(long, default_value = "all")]
        status: Selector<TaskStatus>,
        /// low, medium, high or all
        #[arg(long, default_value = "all")]
        priority: Selector<TaskPriority>,
    },
    /// Create a task; prompts for the fields when no title is given
    Add {
        title: Option<String>,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long, default_value = "todo")]
        status: String,
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date as YYYY-MM-DD
        #[arg(long, default_value = "")]
        due: String,
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Edit a task interactively
    Edit { id: Option<String> },
    /// Move a task to its next status
    Advance { id: String },
    /// Delete a task
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let conn = Connection::open().await?;

    match args.command {
        Some(TaskCommand::List {
            project,
            search,
            status,
            priority,
        }) => {
            let filter = TaskFilter::new().search(&search).status(status).priority(priority);
            handle_list(&conn, project.as_deref(), &filter).await
        }
        Some(TaskCommand::Add {
            title: Some(title),
            description,
            status,
            priority,
            due,
            project,
        }) => {
            let form = TaskForm {
                title,
                description,
                status,
                priority,
                due_date: due,
            };
            handle_add(&conn, form, project).await
        }
        Some(TaskCommand::Add { title: None, project, .. }) => {
            let form = prompt_form(TaskForm::default())?;
            let project = match project {
                Some(project) => Some(project),
                None => select_project(&conn).await?,
            };
            handle_add(&conn, form, project).await
        }
        Some(TaskCommand::Edit { id }) => handle_edit(&conn, id).await,
        Some(TaskCommand::Advance { id }) => handle_advance(&conn, &id).await,
        Some(TaskCommand::Delete { id, yes }) => handle_delete(&conn, &id, yes).await,
        None => handle_interactive(&conn).await,
    }
}

async fn handle_list(conn: &Connection, project: Option<&str>, filter: &TaskFilter) -> Result<()> {
    let tasks = conn.read(conn.data.tasks(project).list().await)?;
    let shown = filter.apply(&tasks);

    if shown.is_empty() {
        msg_info!(Message::NoTasksFound);
        match filter.is_active() {
            true => msg_print!(Message::TasksAdjustFilters),
            false => msg_print!(Message::TasksGetStarted),
        }
        return Ok(());
    }

    let header = match project {
        Some(project_id) => {
            let project = conn.read(conn.data.projects().get(project_id).await)?;
            Message::TasksProjectHeader(project.map(|p| p.name).unwrap_or_else(|| project_id.to_string()))
        }
        None => Message::TasksHeader,
    };
    msg_print!(header, true);
    View::tasks(&shown);
    msg_print!(Message::TasksShown(shown.len(), tasks.len()));
    Ok(())
}

async fn handle_add(conn: &Connection, form: TaskForm, project: Option<String>) -> Result<()> {
    let mut input = match form.validate() {
        Ok(input) => input,
        Err(error) => {
            msg_error!(Message::InvalidInput(error.to_string()));
            return Ok(());
        }
    };
    input.project_id = project;

    if let Some(task) = conn.settle(conn.data.tasks(None).add(input).await)? {
        View::tasks(&[task]);
    }
    Ok(())
}

async fn handle_edit(conn: &Connection, id: Option<String>) -> Result<()> {
    let tasks = conn.data.tasks(None);
    let task = match id {
        Some(id) => find(conn, &tasks, &id).await?,
        None => select_task(conn, &tasks, Message::SelectTaskToEdit).await?,
    };
    let Some(task) = task else {
        return Ok(());
    };

    msg_print!(Message::EditingTask(task.title.clone()), true);
    let form = prompt_form(TaskForm::from_task(&task))?;
    let patch = match form.patch_for(&task) {
        Ok(patch) => patch,
        Err(error) => {
            msg_error!(Message::InvalidInput(error.to_string()));
            return Ok(());
        }
    };
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    conn.settle(tasks.update(&task.id, patch).await)?;
    Ok(())
}

async fn handle_advance(conn: &Connection, id: &str) -> Result<()> {
    let tasks = conn.data.tasks(None);
    let Some(task) = find(conn, &tasks, id).await? else {
        return Ok(());
    };

    match conn.settle(tasks.advance(&task).await)? {
        Some(Some(task)) => msg_success!(Message::TaskAdvanced(task.title, task.status.label().to_string())),
        Some(None) => msg_info!(Message::TaskAlreadyCompleted(task.title)),
        None => {}
    }
    Ok(())
}

async fn handle_delete(conn: &Connection, id: &str, yes: bool) -> Result<()> {
    let tasks = conn.data.tasks(None);
    let Some(task) = find(conn, &tasks, id).await? else {
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    conn.settle(tasks.delete(&task.id).await)?;
    Ok(())
}

async fn handle_interactive(conn: &Connection) -> Result<()> {
    let options = vec!["List tasks", "Add task", "Edit task", "Advance task", "Delete task"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTaskAction.to_string())
        .items(&options)
        .interact()?;

    let tasks = conn.data.tasks(None);
    match selection {
        0 => handle_list(conn, None, &TaskFilter::new()).await,
        1 => {
            let form = prompt_form(TaskForm::default())?;
            let project = select_project(conn).await?;
            handle_add(conn, form, project).await
        }
        2 => handle_edit(conn, None).await,
        3 => match select_task(conn, &tasks, Message::SelectTask).await? {
            Some(task) => handle_advance(conn, &task.id).await,
            None => Ok(()),
        },
        4 => match select_task(conn, &tasks, Message::SelectTask).await? {
            Some(task) => handle_delete(conn, &task.id, false).await,
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

async fn find(conn: &Connection, tasks: &Tasks<RestStore>, id: &str) -> Result<Option<Task>> {
    let task = conn.read(tasks.list().await)?.into_iter().find(|task| task.id == id);
    if task.is_none() {
        msg_error!(Message::TaskNotFoundWithId(id.to_string()));
    }
    Ok(task)
}

async fn select_task(conn: &Connection, tasks: &Tasks<RestStore>, prompt: Message) -> Result<Option<Task>> {
    let list = conn.read(tasks.list().await)?;
    if list.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(None);
    }

    let items: Vec<String> = list
        .iter()
        .map(|task| format!("{} [{}]", task.title, task.status.label()))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(&items)
        .interact()?;
    Ok(list.into_iter().nth(selection))
}

/// Lets the user pick a project for a new task; the first entry means none.
async fn select_project(conn: &Connection) -> Result<Option<String>> {
    let projects: Vec<Project> = conn.read(conn.data.projects().list().await)?;
    if projects.is_empty() {
        return Ok(None);
    }

    let mut items = vec![Message::NoProjectOption.to_string()];
    items.extend(projects.iter().map(|project| project.name.clone()));
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskProject.to_string())
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection.checked_sub(1).and_then(|index| projects.get(index)).map(|project| project.id.clone()))
}

fn prompt_form(defaults: TaskForm) -> Result<TaskForm> {
    let statuses: Vec<&str> = TaskStatus::ALL.iter().map(|status| status.as_str()).collect();
    let priorities: Vec<&str> = TaskPriority::ALL.iter().map(|priority| priority.as_str()).collect();
    let position = |items: &[&str], value: &str| items.iter().position(|item| *item == value).unwrap_or(0);

    let title: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(defaults.title)
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(defaults.description)
        .allow_empty(true)
        .interact_text()?;
    let status = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskStatus.to_string())
        .items(&statuses)
        .default(position(&statuses, &defaults.status))
        .interact()?;
    let priority = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&priorities)
        .default(position(&priorities, &defaults.priority))
        .interact()?;
    let due_date: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(defaults.due_date)
        .allow_empty(true)
        .interact_text()?;

    Ok(TaskForm {
        title,
        description,
        status: statuses[status].to_string(),
        priority: priorities[priority].to_string(),
        due_date,
    })
}
