#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use taskflow::data::{DataContext, DataError};
    use taskflow::libs::messages::Message;
    use taskflow::libs::notify::{Notification, Notifier};
    use taskflow::libs::project::{NewProjectInput, ProjectPatch};
    use taskflow::libs::task::NewTaskInput;
    use taskflow::store::cache::{CacheKey, QueryCache};
    use taskflow::store::memory::MemoryStore;
    use taskflow::store::Table;
    use test_context::{test_context, AsyncTestContext};

    const USER: &str = "user-1";

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().push(notification);
        }
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<Message> {
            self.seen.lock().iter().map(|n| n.title.clone()).collect()
        }
    }

    struct ProjectsTestContext {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        data: DataContext<MemoryStore>,
    }

    impl AsyncTestContext for ProjectsTestContext {
        async fn setup() -> Self {
            let store = Arc::new(MemoryStore::new());
            let notifier = Arc::new(RecordingNotifier::default());
            let data = DataContext::with_shared(store.clone(), Arc::new(QueryCache::new()), notifier.clone(), Some(USER));
            ProjectsTestContext { store, notifier, data }
        }
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_create_and_list(ctx: &mut ProjectsTestContext) {
        let projects = ctx.data.projects();
        let created = projects
            .add(NewProjectInput::new("Launch").with_description("Q3 release"))
            .await
            .unwrap();

        let list = projects.list().await.unwrap();
        assert_eq!(list, vec![created.clone()]);
        assert_eq!(created.name, "Launch");
        assert_eq!(created.description.as_deref(), Some("Q3 release"));
        assert_eq!(created.user_id, USER);
        assert_eq!(ctx.notifier.titles(), vec![Message::ProjectCreated]);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_launch_project_scenario(ctx: &mut ProjectsTestContext) {
        let project = ctx.data.projects().add(NewProjectInput::new("Launch")).await.unwrap();
        let scoped = ctx.data.tasks(Some(&project.id));

        let first = scoped.add(NewTaskInput::new("Landing page")).await.unwrap();
        scoped.add(NewTaskInput::new("Press kit")).await.unwrap();
        ctx.data.tasks(None).add(NewTaskInput::new("Unrelated")).await.unwrap();

        let list = scoped.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|task| task.project_id.as_deref() == Some(project.id.as_str())));

        scoped.delete(&first.id).await.unwrap();
        let list = scoped.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Press kit");
        assert_eq!(ctx.data.tasks(None).list().await.unwrap().len(), 2);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_scoped_add_refreshes_unscoped_list(ctx: &mut ProjectsTestContext) {
        let project = ctx.data.projects().add(NewProjectInput::new("Launch")).await.unwrap();
        let all = ctx.data.tasks(None);
        assert!(all.list().await.unwrap().is_empty());

        ctx.data.tasks(Some(&project.id)).add(NewTaskInput::new("Scoped")).await.unwrap();

        assert!(!ctx.data.cache().contains(&CacheKey::tasks(USER, None)));
        assert_eq!(all.list().await.unwrap().len(), 1);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_unscoped_add_keeps_input_project(ctx: &mut ProjectsTestContext) {
        let project = ctx.data.projects().add(NewProjectInput::new("Launch")).await.unwrap();
        let task = ctx
            .data
            .tasks(None)
            .add(NewTaskInput::new("Assigned").with_project(&project.id))
            .await
            .unwrap();
        assert_eq!(task.project_id.as_deref(), Some(project.id.as_str()));
        assert_eq!(ctx.data.tasks(Some(&project.id)).list().await.unwrap().len(), 1);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_delete_cascades_to_tasks(ctx: &mut ProjectsTestContext) {
        let projects = ctx.data.projects();
        let project = projects.add(NewProjectInput::new("Launch")).await.unwrap();
        let scoped = ctx.data.tasks(Some(&project.id));
        scoped.add(NewTaskInput::new("One")).await.unwrap();
        scoped.add(NewTaskInput::new("Two")).await.unwrap();
        assert_eq!(scoped.list().await.unwrap().len(), 2);

        projects.delete(&project.id).await.unwrap();

        assert!(projects.list().await.unwrap().is_empty());
        assert!(!ctx.data.cache().contains(&CacheKey::tasks(USER, Some(&project.id))));
        assert!(scoped.list().await.unwrap().is_empty());
        assert!(ctx.store.rows(Table::Tasks).is_empty());
        assert_eq!(ctx.notifier.titles().last(), Some(&Message::ProjectDeleted));
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_update_description_only(ctx: &mut ProjectsTestContext) {
        let projects = ctx.data.projects();
        let project = projects
            .add(NewProjectInput::new("Launch").with_description("Old"))
            .await
            .unwrap();

        let patch = ProjectPatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = projects.update(&project.id, patch).await.unwrap();
        assert_eq!(updated.name, "Launch");
        assert_eq!(updated.description, None);
        assert!(updated.updated_at > project.updated_at);

        let fetched = projects.get(&project.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(ctx.notifier.titles().last(), Some(&Message::ProjectUpdated));
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_get_unknown_project(ctx: &mut ProjectsTestContext) {
        ctx.data.projects().add(NewProjectInput::new("Launch")).await.unwrap();
        assert!(ctx.data.projects().get("projects-999999").await.unwrap().is_none());
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_failed_delete_keeps_project(ctx: &mut ProjectsTestContext) {
        let projects = ctx.data.projects();
        let project = projects.add(NewProjectInput::new("Launch")).await.unwrap();
        let before = projects.list().await.unwrap();

        ctx.store.fail_next("permission denied for table projects");
        assert!(projects.delete(&project.id).await.is_err());

        assert_eq!(projects.loaded(), before);
        assert_eq!(ctx.notifier.titles().last(), Some(&Message::ProjectDeleteFailed));
        assert_eq!(projects.list().await.unwrap().len(), 1);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_project_mutations_require_user(ctx: &mut ProjectsTestContext) {
        let anonymous = DataContext::with_shared(ctx.store.clone(), Arc::new(QueryCache::new()), ctx.notifier.clone(), None);
        let result = anonymous.projects().add(NewProjectInput::new("Nope")).await;

        assert!(matches!(result, Err(DataError::AuthRequired)));
        assert!(anonymous.projects().list().await.unwrap().is_empty());
        assert_eq!(ctx.store.calls(), 0);
        assert_eq!(ctx.notifier.titles(), vec![Message::ProjectCreateFailed]);
    }

    #[test_context(ProjectsTestContext)]
    #[tokio::test]
    async fn test_blank_name_is_rejected(ctx: &mut ProjectsTestContext) {
        let result = ctx.data.projects().add(NewProjectInput::new(" ")).await;
        assert!(matches!(result, Err(DataError::Validation(_))));
        assert_eq!(ctx.store.calls(), 0);
    }
}
