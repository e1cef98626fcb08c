#[cfg(test)]
mod tests {
    use serde_json::json;
    use taskflow::store::memory::MemoryStore;
    use taskflow::store::{Order, Query, RemoteStore, StoreError, Table};

    #[test]
    fn test_query_params() {
        let query = Query::new()
            .eq("user_id", "user-1")
            .eq("project_id", "projects-000001")
            .order("created_at", Order::Desc);

        assert_eq!(
            query.to_params(),
            vec![
                ("user_id".to_string(), "eq.user-1".to_string()),
                ("project_id".to_string(), "eq.projects-000001".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
        assert_eq!(query.ordering(), Some(("created_at", Order::Desc)));
    }

    #[test]
    fn test_query_matches_rows() {
        let query = Query::new().eq("user_id", "user-1").eq("project_id", "p1");

        assert!(query.matches(&json!({"user_id": "user-1", "project_id": "p1"})));
        assert!(!query.matches(&json!({"user_id": "user-1", "project_id": null})));
        assert!(!query.matches(&json!({"user_id": "user-1"})));
        assert!(!query.matches(&json!({"user_id": "user-2", "project_id": "p1"})));
    }

    #[tokio::test]
    async fn test_memory_store_assigns_server_fields() {
        let store = MemoryStore::new();
        let row = store
            .insert(Table::Projects, json!({"user_id": "user-1", "name": "Launch"}))
            .await
            .unwrap();

        assert_eq!(row["id"], "projects-000001");
        assert!(row["created_at"].is_string());
        assert_eq!(row["created_at"], row["updated_at"]);
    }

    #[tokio::test]
    async fn test_memory_store_update_ignores_server_columns() {
        let store = MemoryStore::new();
        let row = store.insert(Table::Projects, json!({"name": "Launch"})).await.unwrap();

        let updated = store
            .update(
                Table::Projects,
                &Query::new().eq("id", "projects-000001"),
                json!({"id": "hijacked", "created_at": "1970-01-01T00:00:00Z", "name": "Renamed"}),
            )
            .await
            .unwrap();

        assert_eq!(updated["id"], row["id"]);
        assert_eq!(updated["created_at"], row["created_at"]);
        assert_eq!(updated["name"], "Renamed");
        assert_ne!(updated["updated_at"], row["updated_at"]);
    }

    #[tokio::test]
    async fn test_memory_store_single_row_updates() {
        let store = MemoryStore::new();
        store.insert(Table::Tasks, json!({"user_id": "user-1", "title": "a"})).await.unwrap();
        store.insert(Table::Tasks, json!({"user_id": "user-1", "title": "b"})).await.unwrap();

        let result = store
            .update(Table::Tasks, &Query::new().eq("user_id", "user-1"), json!({"title": "c"}))
            .await;
        assert!(matches!(result, Err(StoreError::NotSingle(2))));
    }

    #[tokio::test]
    async fn test_memory_store_fail_next_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next("JWT expired");

        let result = store.select(Table::Tasks, &Query::new()).await;
        match result {
            Err(StoreError::Remote(message)) => assert_eq!(message, "JWT expired"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(store.select(Table::Tasks, &Query::new()).await.unwrap().is_empty());
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_orders_rows() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store.insert(Table::Tasks, json!({"user_id": "user-1", "title": title})).await.unwrap();
        }

        let query = Query::new().eq("user_id", "user-1").order("created_at", Order::Asc);
        let titles: Vec<String> = store
            .select(Table::Tasks, &query)
            .await
            .unwrap()
            .iter()
            .map(|row| row["title"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
