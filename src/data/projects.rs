use super::{decode, encode, DataContext, DataError, Outcome};
use crate::libs::form::ValidationError;
use crate::libs::messages::Message;
use crate::libs::project::{NewProject, NewProjectInput, Project, ProjectPatch, ProjectRow};
use crate::store::cache::{CacheKey, Entity};
use crate::store::{Order, Query, RemoteStore, Table};

/// Project list of the current user.
pub struct Projects<S> {
    ctx: DataContext<S>,
}

impl<S: RemoteStore> Projects<S> {
    pub fn new(ctx: DataContext<S>) -> Self {
        Self { ctx }
    }

    /// All projects of the user, newest first.
    pub async fn list(&self) -> Result<Vec<Project>, DataError> {
        let Some(user_id) = self.ctx.user_id() else {
            return Ok(Vec::new());
        };
        self.ctx.cache().get_or_fetch(&CacheKey::projects(user_id), || self.fetch(user_id)).await
    }

    async fn fetch(&self, user_id: &str) -> Result<Vec<Project>, DataError> {
        let query = Query::new().eq("user_id", user_id).order("created_at", Order::Desc);
        let rows = self.ctx.store().select(Table::Projects, &query).await?;
        rows.into_iter().map(decode::<ProjectRow, Project>).collect()
    }

    pub fn loaded(&self) -> Vec<Project> {
        self.ctx
            .user_id()
            .and_then(|user_id| self.ctx.cache().peek::<Project>(&CacheKey::projects(user_id)))
            .unwrap_or_default()
    }

    /// Looks a project up in the user's list.
    pub async fn get(&self, id: &str) -> Result<Option<Project>, DataError> {
        Ok(self.list().await?.into_iter().find(|project| project.id == id))
    }

    pub async fn add(&self, input: NewProjectInput) -> Result<Project, DataError> {
        let result = self.insert(input).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::ProjectCreated,
                description: Message::ProjectCreatedDescription,
                failure: Message::ProjectCreateFailed,
            },
        )
    }

    async fn insert(&self, input: NewProjectInput) -> Result<Project, DataError> {
        let user_id = self.ctx.require_user()?;
        if input.name.trim().is_empty() {
            return Err(ValidationError::Required("Name").into());
        }

        let payload = encode(&NewProject::from_input(user_id, input))?;
        let row = self.ctx.store().insert(Table::Projects, payload).await?;
        let project = decode::<ProjectRow, Project>(row)?;

        self.ctx.cache().invalidate(&CacheKey::projects(user_id));
        Ok(project)
    }

    pub async fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project, DataError> {
        let result = self.patch(id, patch).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::ProjectUpdated,
                description: Message::ProjectUpdatedDescription,
                failure: Message::ProjectUpdateFailed,
            },
        )
    }

    async fn patch(&self, id: &str, patch: ProjectPatch) -> Result<Project, DataError> {
        let user_id = self.ctx.require_user()?;
        if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::Required("Name").into());
        }

        let payload = encode(&patch)?;
        let row = self.ctx.store().update(Table::Projects, &Query::new().eq("id", id), payload).await?;
        let project = decode::<ProjectRow, Project>(row)?;

        self.ctx.cache().invalidate(&CacheKey::projects(user_id));
        Ok(project)
    }

    /// Deletes a project. The store removes its tasks with it, so every
    /// cached task list of the user is dropped as well.
    pub async fn delete(&self, id: &str) -> Result<(), DataError> {
        let result = self.remove(id).await;
        self.ctx.report(
            result,
            Outcome {
                success: Message::ProjectDeleted,
                description: Message::ProjectDeletedDescription,
                failure: Message::ProjectDeleteFailed,
            },
        )
    }

    async fn remove(&self, id: &str) -> Result<(), DataError> {
        let user_id = self.ctx.require_user()?;
        self.ctx.store().delete(Table::Projects, &Query::new().eq("id", id)).await?;

        self.ctx.cache().invalidate(&CacheKey::projects(user_id));
        self.ctx.cache().invalidate_entity(Entity::Tasks, user_id);
        Ok(())
    }
}
