use super::Connection;
use crate::{
    libs::{form::ProjectForm, messages::Message, project::Project, view::View},
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: Option<ProjectCommand>,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Show all projects
    List,
    /// Create a project; prompts for the fields when no name is given
    Create {
        name: Option<String>,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Edit a project interactively
    Edit { id: Option<String> },
    /// Delete a project and its tasks
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Project details with its tasks and statistics
    Show { id: String },
}

pub async fn cmd(args: ProjectArgs) -> Result<()> {
    let conn = Connection::open().await?;

    match args.command {
        Some(ProjectCommand::List) => handle_list(&conn).await,
        Some(ProjectCommand::Create {
            name: Some(name),
            description,
        }) => handle_create(&conn, ProjectForm { name, description }).await,
        Some(ProjectCommand::Create { name: None, .. }) => handle_create(&conn, prompt_form(ProjectForm::default())?).await,
        Some(ProjectCommand::Edit { id }) => handle_edit(&conn, id).await,
        Some(ProjectCommand::Delete { id, yes }) => handle_delete(&conn, &id, yes).await,
        Some(ProjectCommand::Show { id }) => handle_show(&conn, &id).await,
        None => handle_interactive(&conn).await,
    }
}

async fn handle_list(conn: &Connection) -> Result<()> {
    let projects = conn.read(conn.data.projects().list().await)?;
    if projects.is_empty() {
        msg_info!(Message::NoProjectsFound);
        return Ok(());
    }

    msg_print!(Message::ProjectsHeader, true);
    View::projects(&projects);
    Ok(())
}

async fn handle_create(conn: &Connection, form: ProjectForm) -> Result<()> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(error) => {
            msg_error!(Message::InvalidInput(error.to_string()));
            return Ok(());
        }
    };

    if let Some(project) = conn.settle(conn.data.projects().add(input).await)? {
        View::projects(&[project]);
    }
    Ok(())
}

async fn handle_edit(conn: &Connection, id: Option<String>) -> Result<()> {
    let project = match id {
        Some(id) => find(conn, &id).await?,
        None => select_project(conn).await?,
    };
    let Some(project) = project else {
        return Ok(());
    };

    msg_print!(Message::EditingProject(project.name.clone()), true);
    let form = prompt_form(ProjectForm::from_project(&project))?;
    let patch = match form.patch_for(&project) {
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

    conn.settle(conn.data.projects().update(&project.id, patch).await)?;
    Ok(())
}

async fn handle_delete(conn: &Connection, id: &str, yes: bool) -> Result<()> {
    let Some(project) = find(conn, id).await? else {
        return Ok(());
    };

    let task_count = conn.read(conn.data.tasks(Some(&project.id)).list().await)?.len();
    let prompt = match task_count {
        0 => Message::ConfirmDeleteProject(project.name.clone()),
        count => Message::ConfirmDeleteProjectWithTasks(project.name.clone(), count),
    };
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    conn.settle(conn.data.projects().delete(&project.id).await)?;
    Ok(())
}

async fn handle_show(conn: &Connection, id: &str) -> Result<()> {
    let Some(project) = find(conn, id).await? else {
        return Ok(());
    };

    View::project(&project);

    let tasks = conn.data.tasks(Some(&project.id));
    let list = conn.read(tasks.list().await)?;
    View::stats(&tasks.stats());
    if list.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }
    msg_print!(Message::TasksProjectHeader(project.name), true);
    View::tasks(&list);
    Ok(())
}

async fn handle_interactive(conn: &Connection) -> Result<()> {
    let options = vec!["List projects", "Create project", "Edit project", "Delete project", "Show project"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectProjectAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => handle_list(conn).await,
        1 => handle_create(conn, prompt_form(ProjectForm::default())?).await,
        2 => handle_edit(conn, None).await,
        3 => match select_project(conn).await? {
            Some(project) => handle_delete(conn, &project.id, false).await,
            None => Ok(()),
        },
        4 => match select_project(conn).await? {
            Some(project) => handle_show(conn, &project.id).await,
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

async fn find(conn: &Connection, id: &str) -> Result<Option<Project>> {
    let project = conn.read(conn.data.projects().get(id).await)?;
    if project.is_none() {
        msg_error!(Message::ProjectNotFound(id.to_string()));
    }
    Ok(project)
}

async fn select_project(conn: &Connection) -> Result<Option<Project>> {
    let projects = conn.read(conn.data.projects().list().await)?;
    if projects.is_empty() {
        msg_info!(Message::NoProjectsFound);
        return Ok(None);
    }

    let names: Vec<String> = projects.iter().map(|project| project.name.clone()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectProject.to_string())
        .items(&names)
        .interact()?;
    Ok(projects.into_iter().nth(selection))
}

fn prompt_form(defaults: ProjectForm) -> Result<ProjectForm> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptProjectName.to_string())
        .default(defaults.name)
        .interact_text()?;
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptProjectDescription.to_string())
        .default(defaults.description)
        .allow_empty(true)
        .interact_text()?;

    Ok(ProjectForm { name, description })
}
