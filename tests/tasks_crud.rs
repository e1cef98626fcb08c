#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use taskflow::data::{DataContext, DataError};
    use taskflow::libs::form::ValidationError;
    use taskflow::libs::messages::Message;
    use taskflow::libs::notify::{Notification, NotificationKind, Notifier};
    use taskflow::libs::task::{NewTaskInput, TaskPatch, TaskPriority, TaskStatus};
    use taskflow::store::cache::{CacheKey, QueryCache};
    use taskflow::store::memory::MemoryStore;
    use taskflow::store::{StoreError, Table};
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
        fn take(&self) -> Vec<Notification> {
            std::mem::take(&mut *self.seen.lock())
        }
    }

    struct TasksTestContext {
        store: Arc<MemoryStore>,
        notifier: Arc<RecordingNotifier>,
        data: DataContext<MemoryStore>,
    }

    impl TasksTestContext {
        fn anonymous(&self) -> DataContext<MemoryStore> {
            DataContext::with_shared(self.store.clone(), Arc::new(QueryCache::new()), self.notifier.clone(), None)
        }
    }

    impl AsyncTestContext for TasksTestContext {
        async fn setup() -> Self {
            let store = Arc::new(MemoryStore::new());
            let notifier = Arc::new(RecordingNotifier::default());
            let data = DataContext::with_shared(store.clone(), Arc::new(QueryCache::new()), notifier.clone(), Some(USER));
            TasksTestContext { store, notifier, data }
        }
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_add_then_list(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        assert!(tasks.list().await.unwrap().is_empty());

        let input = NewTaskInput::new("Write spec")
            .with_description("First draft")
            .with_priority(TaskPriority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let created = tasks.add(input).await.unwrap();

        let list = tasks.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], created);
        assert!(!created.id.is_empty());
        assert_eq!(created.user_id, USER);
        assert_eq!(created.title, "Write spec");
        assert_eq!(created.description, "First draft");
        assert_eq!(created.status, TaskStatus::Todo);
        assert_eq!(created.priority, TaskPriority::High);
        assert_eq!(created.due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(created.project_id, None);
        assert!(created.created_at <= created.updated_at);

        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert_eq!(notifications[0].title, Message::TaskCreated);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_write_spec_status_flow(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let task = tasks.add(NewTaskInput::new("Write spec")).await.unwrap();
        assert_eq!(tasks.list().await.unwrap()[0].status, TaskStatus::Todo);

        let updated = tasks.update_status(&task.id, TaskStatus::InProgress).await.unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);

        let list = tasks.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].status, TaskStatus::InProgress);
        assert!(list[0].updated_at > task.updated_at);
        assert_eq!(list[0].created_at, task.created_at);
        assert_eq!(tasks.stats().in_progress, 1);

        let titles: Vec<Message> = ctx.notifier.take().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec![Message::TaskCreated, Message::TaskUpdated]);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_partial_update_keeps_other_fields(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let task = tasks
            .add(
                NewTaskInput::new("Draft")
                    .with_description("Keep me")
                    .with_priority(TaskPriority::Low)
                    .with_due_date(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap()),
            )
            .await
            .unwrap();

        let patch = TaskPatch {
            title: Some("Final".to_string()),
            ..Default::default()
        };
        let updated = tasks.update(&task.id, patch).await.unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, "Keep me");
        assert_eq!(updated.priority, TaskPriority::Low);
        assert_eq!(updated.status, TaskStatus::Todo);
        assert_eq!(updated.due_date, task.due_date);
        assert_eq!(updated.created_at, task.created_at);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_clear_due_date(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let task = tasks
            .add(NewTaskInput::new("Dated").with_due_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()))
            .await
            .unwrap();

        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        let updated = tasks.update(&task.id, patch).await.unwrap();
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.title, "Dated");
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_advance_walks_status(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let task = tasks.add(NewTaskInput::new("Ship")).await.unwrap();

        let task = tasks.advance(&task).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        let task = tasks.advance(&task).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Completed);

        let calls = ctx.store.calls();
        let notified = ctx.notifier.take().len();
        assert!(tasks.advance(&task).await.unwrap().is_none());
        assert_eq!(ctx.store.calls(), calls);
        assert!(ctx.notifier.take().is_empty());
        assert_eq!(notified, 3);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_delete_task(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let keep = tasks.add(NewTaskInput::new("Keep")).await.unwrap();
        let drop = tasks.add(NewTaskInput::new("Drop")).await.unwrap();
        assert_eq!(tasks.list().await.unwrap().len(), 2);

        tasks.delete(&drop.id).await.unwrap();

        let list = tasks.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, keep.id);
        assert_eq!(ctx.notifier.take().last().map(|n| n.title.clone()), Some(Message::TaskDeleted));
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_list_newest_first(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        for title in ["one", "two", "three"] {
            tasks.add(NewTaskInput::new(title)).await.unwrap();
        }

        let titles: Vec<String> = tasks.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_list_is_cached_until_mutation(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        tasks.list().await.unwrap();
        let calls = ctx.store.calls();

        tasks.list().await.unwrap();
        assert_eq!(ctx.store.calls(), calls);

        tasks.add(NewTaskInput::new("New")).await.unwrap();
        assert!(!ctx.data.cache().contains(&CacheKey::tasks(USER, None)));
        assert_eq!(tasks.list().await.unwrap().len(), 1);
        // insert + refetch
        assert_eq!(ctx.store.calls(), calls + 2);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_mutations_require_user(ctx: &mut TasksTestContext) {
        let data = ctx.anonymous();
        let tasks = data.tasks(None);

        let result = tasks.add(NewTaskInput::new("Nope")).await;
        assert!(matches!(result, Err(DataError::AuthRequired)));
        let result = tasks.update_status("tasks-000001", TaskStatus::Completed).await;
        assert!(matches!(result, Err(DataError::AuthRequired)));
        let result = tasks.delete("tasks-000001").await;
        assert!(matches!(result, Err(DataError::AuthRequired)));

        assert_eq!(ctx.store.calls(), 0);
        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 3);
        assert!(notifications.iter().all(Notification::is_error));
        assert_eq!(notifications[0].title, Message::TaskCreateFailed);
        assert_eq!(notifications[0].description, "User not authenticated");
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_list_without_user_does_not_query(ctx: &mut TasksTestContext) {
        let data = ctx.anonymous();
        assert!(data.tasks(None).list().await.unwrap().is_empty());
        assert!(data.tasks(Some("projects-000001")).list().await.unwrap().is_empty());
        assert_eq!(ctx.store.calls(), 0);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_failed_add_leaves_cache_untouched(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        tasks.add(NewTaskInput::new("Existing")).await.unwrap();
        let before = tasks.list().await.unwrap();
        ctx.notifier.take();

        ctx.store.fail_next("duplicate key value violates unique constraint");
        let result = tasks.add(NewTaskInput::new("Broken")).await;

        assert!(matches!(result, Err(DataError::Store(StoreError::Remote(_)))));
        assert_eq!(tasks.loaded(), before);
        assert!(ctx.data.cache().contains(&CacheKey::tasks(USER, None)));
        assert_eq!(ctx.store.rows(Table::Tasks).len(), 1);

        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Error);
        assert_eq!(notifications[0].title, Message::TaskCreateFailed);
        assert_eq!(notifications[0].description, "duplicate key value violates unique constraint");
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_blank_title_is_rejected(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let result = tasks.add(NewTaskInput::new("   ")).await;
        assert!(matches!(result, Err(DataError::Validation(ValidationError::Required(_)))));

        let task = tasks.add(NewTaskInput::new("Real")).await.unwrap();
        let patch = TaskPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        let calls = ctx.store.calls();
        assert!(tasks.update(&task.id, patch).await.is_err());
        assert_eq!(ctx.store.calls(), calls);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_update_unknown_task(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        let result = tasks.update_status("tasks-999999", TaskStatus::Completed).await;
        assert!(matches!(result, Err(DataError::Store(StoreError::NotSingle(0)))));

        let notifications = ctx.notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, Message::TaskUpdateFailed);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_stats_sum_to_total(ctx: &mut TasksTestContext) {
        let tasks = ctx.data.tasks(None);
        tasks.add(NewTaskInput::new("a")).await.unwrap();
        tasks.add(NewTaskInput::new("b").with_status(TaskStatus::InProgress)).await.unwrap();
        tasks.add(NewTaskInput::new("c").with_status(TaskStatus::Completed)).await.unwrap();
        tasks.add(NewTaskInput::new("d").with_status(TaskStatus::Completed)).await.unwrap();
        tasks.list().await.unwrap();

        let stats = tasks.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed + stats.in_progress + stats.todo, stats.total);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.completion_rate(), 50);
    }

    #[test_context(TasksTestContext)]
    #[tokio::test]
    async fn test_users_do_not_see_each_other(ctx: &mut TasksTestContext) {
        ctx.data.tasks(None).add(NewTaskInput::new("Mine")).await.unwrap();

        let other = DataContext::with_shared(ctx.store.clone(), Arc::new(QueryCache::new()), ctx.notifier.clone(), Some("user-2"));
        assert!(other.tasks(None).list().await.unwrap().is_empty());
        assert_eq!(ctx.data.tasks(None).list().await.unwrap().len(), 1);
    }
}
