pub mod calendar;
pub mod dashboard;
pub mod init;
pub mod login;
pub mod logout;
pub mod project;
pub mod task;

use crate::api::{Session, Supabase};
use crate::data::{DataContext, DataError};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::notify::ConsoleNotifier;
use crate::store::rest::RestStore;
use crate::store::StoreError;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the backend connection")]
    Init(init::InitArgs),
    #[command(about = "Log in to the backend")]
    Login(login::LoginArgs),
    #[command(about = "Forget the cached session and password")]
    Logout,
    #[command(about = "List and manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "List and manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Task overview with completion rate")]
    Dashboard,
    #[command(about = "Tasks by due date for a month")]
    Calendar(calendar::CalendarArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd(),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Project(args) => project::cmd(args).await,
            Commands::Dashboard => dashboard::cmd().await,
            Commands::Calendar(args) => calendar::cmd(args).await,
        }
    }
}

/// An authenticated data context for the configured backend.
pub(crate) struct Connection {
    auth: Supabase,
    pub data: DataContext<RestStore>,
}

impl Connection {
    /// Reads the backend config, logs in if needed and builds the data layer.
    pub async fn open() -> Result<Self> {
        let backend = Config::read()?.backend()?;
        if backend.email.trim().is_empty() {
            msg_bail_anyhow!(Message::NotAuthenticated);
        }

        let mut auth = Supabase::new(&backend);
        let (store, user_id) = auth.connect().await?;
        let data = DataContext::new(store, ConsoleNotifier, Some(&user_id));
        Ok(Self { auth, data })
    }

    /// Unwraps a read. An expired token drops the cached session so the next
    /// command logs in again.
    pub fn read<T>(&self, result: Result<T, DataError>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(DataError::Store(StoreError::Unauthorized)) => {
                self.auth.delete_session()?;
                msg_bail_anyhow!(Message::SessionExpired)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Settles a mutation whose outcome was already reported by the notifier.
    pub fn settle<T>(&self, result: Result<T, DataError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(DataError::Store(StoreError::Unauthorized)) => {
                self.auth.delete_session()?;
                msg_warning!(Message::SessionExpired);
                Ok(None)
            }
            Err(_) => Ok(None),
        }
    }
}
