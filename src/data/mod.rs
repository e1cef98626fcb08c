//! Data access for tasks and projects.
//!
//! Each entity has a thin access layer over the remote store:
//!
//! - [`tasks::Tasks`]: task list for the user, optionally scoped to a project
//! - [`projects::Projects`]: project list for the user
//!
//! Reads go through the shared [`QueryCache`]. Mutations call the store,
//! invalidate the affected cache entries on success and report the outcome
//! once through the [`Notifier`]. A failed mutation leaves the cache exactly
//! as it was.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::data::DataContext;
//! use taskflow::libs::notify::ConsoleNotifier;
//! use taskflow::libs::task::NewTaskInput;
//! use taskflow::store::memory::MemoryStore;
//!
//! # async fn run() -> Result<(), taskflow::data::DataError> {
//! let ctx = DataContext::new(MemoryStore::new(), ConsoleNotifier, Some("user-1"));
//! let tasks = ctx.tasks(None);
//! tasks.add(NewTaskInput::new("Write spec")).await?;
//! let stats = tasks.stats();
//! # Ok(())
//! # }
//! ```

use crate::libs::form::ValidationError;
use crate::libs::messages::Message;
use crate::libs::notify::{Notification, Notifier};
use crate::store::cache::QueryCache;
use crate::store::{RemoteStore, StoreError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub mod projects;
pub mod tasks;

pub use projects::Projects;
pub use tasks::Tasks;

#[derive(Debug, Error)]
pub enum DataError {
    /// A mutation was attempted without an authenticated user.
    #[error("User not authenticated")]
    AuthRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Titles and description of the notifications a mutation can emit.
pub(crate) struct Outcome {
    pub success: Message,
    pub description: Message,
    pub failure: Message,
}

/// Shared handles for the data layer: store, cache, notifier and the
/// authenticated user, if any.
pub struct DataContext<S> {
    store: Arc<S>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    user_id: Option<String>,
}

impl<S> Clone for DataContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            notifier: Arc::clone(&self.notifier),
            user_id: self.user_id.clone(),
        }
    }
}

impl<S: RemoteStore> DataContext<S> {
    pub fn new(store: S, notifier: impl Notifier + 'static, user_id: Option<&str>) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(QueryCache::new()), Arc::new(notifier), user_id)
    }

    /// Builds a context over existing handles, e.g. to share one cache
    /// between several users or sessions.
    pub fn with_shared(store: Arc<S>, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>, user_id: Option<&str>) -> Self {
        Self {
            store,
            cache,
            notifier,
            user_id: user_id.map(str::to_string),
        }
    }

    pub fn tasks(&self, scope: Option<&str>) -> Tasks<S> {
        Tasks::new(self.clone(), scope)
    }

    pub fn projects(&self) -> Projects<S> {
        Projects::new(self.clone())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub(crate) fn require_user(&self) -> Result<&str, DataError> {
        self.user_id().ok_or(DataError::AuthRequired)
    }

    /// Emits the notification for a finished mutation and hands the result back.
    pub(crate) fn report<T>(&self, result: Result<T, DataError>, outcome: Outcome) -> Result<T, DataError> {
        let notification = match &result {
            Ok(_) => Notification::success(outcome.success, outcome.description),
            Err(error) => Notification::error(outcome.failure, error.to_string()),
        };
        self.notifier.notify(notification);
        result
    }
}

/// Decodes a store row into its wire type and maps it to the client type.
pub(crate) fn decode<R, T>(row: Value) -> Result<T, DataError>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let row: R = serde_json::from_value(row).map_err(StoreError::from)?;
    Ok(T::from(row))
}

pub(crate) fn encode<P: serde::Serialize>(payload: &P) -> Result<Value, DataError> {
    Ok(serde_json::to_value(payload).map_err(StoreError::from)?)
}
