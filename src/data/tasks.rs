use super::{decode, encode, DataContext, DataError, Outcome};
use crate::libs::form::ValidationError;
use crate::libs::messages::Message;
use crate::libs::stats::TaskStats;
use crate::libs::task::{NewTask, NewTaskInput, Task, TaskPatch, TaskRow, TaskStatus};
use crate::msg_debug;
use crate::store::cache::{CacheKey, Entity};
use crate::store::{Order, Query, RemoteStore, Table};

/// Task list of the current user, optionally scoped to one project.
///
/// Without an authenticated user the list is empty and nothing is queried.
/// Task mutations invalidate every cached task list of the user, because a
/// task shows up both in its project's list and in the unscoped one.
pub struct Tasks<S> {
    ctx: DataContext<S>,
    scope: Option<String>,
}

impl<S: RemoteStore> Tasks<S> {
    pub fn new(ctx: DataContext<S>, scope: Option<&str>) -> Self {
        Self {
            ctx,
            scope: scope.map(str::to_string),
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn key(&self, user_id: &str) -> CacheKey {
        CacheKey::tasks(user_id, self.scope())
    }

    /// All tasks in scope, newest first.
    pub async fn list(&self) -> Result<Vec<Task>, DataError> {
        let Some(user_id) = self.ctx.user_id() else {
            return Ok(Vec::new());
        };
        self.ctx.cache().get_or_fetch(&self.key(user_id), || self.fetch(user_id)).await
    }

    async fn fetch(&self, user_id: &str) -> Result<Vec<Task>, DataError> {
        let mut query = Query::new().eq("user_id", user_id);
        if let Some(project_id) = self.scope() {
            query = query.eq("project_id", project_id);
        }
        let query = query.order("created_at", Order::Desc);

        let rows = self.ctx.store().select(Table::Tasks, &query).await?;
        msg_debug!(format!("fetched {} task(s) for scope {:?}", rows.len(), self.scope()));
        rows.into_iter().map(decode::<TaskRow, Task>).collect()
    }

    /// The currently cached list, without any I/O.
    pub fn loaded(&self) -> Vec<Task> {
        self.ctx
            .user_id()
            .and_then(|user_id| self.ctx.cache().peek::<Task>(&self.key(user_id)))
            .unwrap_or_default()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.loaded())
    }

    /// Creates a task owned by the current user.
    ///
    /// The task lands in this list's project scope; an unscoped list keeps
    /// whatever project the input names.
    pub async fn add(&self, input: NewTaskInput) -> Result<Task, DataError> {
        let result = self.insert(input).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::TaskCreated,
                description: Message::TaskCreatedDescription,
                failure: Message::TaskCreateFailed,
            },
        )
    }

    async fn insert(&self, input: NewTaskInput) -> Result<Task, DataError> {
        let user_id = self.ctx.require_user()?;
        if input.title.trim().is_empty() {
            return Err(ValidationError::Required("Title").into());
        }

        let project_id = self.scope.clone().or_else(|| input.project_id.clone());
        let payload = encode(&NewTask::from_input(user_id, project_id, input))?;
        let row = self.ctx.store().insert(Table::Tasks, payload).await?;
        let task = decode::<TaskRow, Task>(row)?;

        self.ctx.cache().invalidate_entity(Entity::Tasks, user_id);
        Ok(task)
    }

    /// Applies a partial update; fields absent from `patch` keep their values.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, DataError> {
        let result = self.patch(id, patch).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::TaskUpdated,
                description: Message::TaskUpdatedDescription,
                failure: Message::TaskUpdateFailed,
            },
        )
    }

    async fn patch(&self, id: &str, patch: TaskPatch) -> Result<Task, DataError> {
        let user_id = self.ctx.require_user()?;
        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(ValidationError::Required("Title").into());
        }

        let payload = encode(&patch)?;
        let row = self.ctx.store().update(Table::Tasks, &Query::new().eq("id", id), payload).await?;
        let task = decode::<TaskRow, Task>(row)?;

        self.ctx.cache().invalidate_entity(Entity::Tasks, user_id);
        Ok(task)
    }

    pub async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task, DataError> {
        self.update(id, TaskPatch::status(status)).await
    }

    /// Moves `task` one step along todo, in-progress, completed.
    ///
    /// Returns `Ok(None)` without touching the store when the task is
    /// already completed.
    pub async fn advance(&self, task: &Task) -> Result<Option<Task>, DataError> {
        match task.status.next() {
            Some(next) => self.update_status(&task.id, next).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), DataError> {
        let result = self.remove(id).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::TaskDeleted,
                description: Message::TaskDeletedDescription,
                failure: Message::TaskDeleteFailed,
            },
        )
    }

    async fn remove(&self, id: &str) -> Result<(), DataError> {
        let user_id = self.ctx.require_user()?;
        self.ctx.store().delete(Table::Tasks, &Query::new().eq("id", id)).await?;
        self.ctx.cache().invalidate_entity(Entity::Tasks, user_id);
        Ok(())
    }
}
