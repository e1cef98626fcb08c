//! In-process row store with the backend's semantics.
//!
//! Behaves like the hosted store as far as the data layer can observe:
//!
//! - `id`, `created_at` and `updated_at` are assigned on insert
//! - `updated_at` is refreshed on every update and never goes backwards
//! - single-row writes fail when zero or several rows match
//! - deleting a project deletes the tasks that reference it
//! - concurrent writes are not serialized beyond the lock: last write wins
//!
//! Timestamps come from a logical clock so that ordering by `created_at` is
//! deterministic even for rows inserted within the same microsecond.

use super::{Order, Query, RemoteStore, StoreError, Table};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct State {
    rows: HashMap<Table, Vec<Value>>,
    next_id: u64,
    tick: i64,
    fail_next: Option<String>,
    calls: usize,
}

#[derive(Debug)]
pub struct MemoryStore {
    epoch: DateTime<Utc>,
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            epoch: Utc::now(),
            state: Mutex::new(State::default()),
        }
    }

    /// Makes the next operation fail with `message`, as a server rejection.
    pub fn fail_next(&self, message: &str) {
        self.state.lock().fail_next = Some(message.to_string());
    }

    /// Number of operations that reached the store.
    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }

    /// Raw rows of a table, for assertions.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.state.lock().rows.get(&table).cloned().unwrap_or_default()
    }

    fn enter(&self) -> Result<parking_lot::MutexGuard<'_, State>, StoreError> {
        let mut state = self.state.lock();
        state.calls += 1;
        if let Some(message) = state.fail_next.take() {
            return Err(StoreError::Remote(message));
        }
        Ok(state)
    }

    fn now(&self, state: &mut State) -> String {
        state.tick += 1;
        (self.epoch + Duration::microseconds(state.tick)).to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}

fn as_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Remote(format!("Expected a JSON object, got {}", other))),
    }
}

fn compare(a: &Value, b: &Value, column: &str) -> std::cmp::Ordering {
    let key = |row: &Value| row.get(column).and_then(Value::as_str).map(str::to_string);
    key(a).cmp(&key(b))
}

impl RemoteStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        let state = self.enter()?;
        let mut rows: Vec<Value> = state.rows.get(&table).map(|rows| rows.iter().filter(|row| query.matches(row)).cloned().collect()).unwrap_or_default();

        if let Some((column, order)) = query.ordering() {
            rows.sort_by(|a, b| compare(a, b, column));
            if order == Order::Desc {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
        let mut state = self.enter()?;
        let mut row = as_object(row)?;

        state.next_id += 1;
        let id = format!("{}-{:06}", table.name(), state.next_id);
        let now = self.now(&mut state);
        row.insert("id".to_string(), Value::String(id));
        row.insert("created_at".to_string(), Value::String(now.clone()));
        row.insert("updated_at".to_string(), Value::String(now));

        let row = Value::Object(row);
        state.rows.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, query: &Query, patch: Value) -> Result<Value, StoreError> {
        let mut state = self.enter()?;
        let patch = as_object(patch)?;
        let now = self.now(&mut state);

        let rows = state.rows.entry(table).or_default();
        let matching: Vec<usize> = rows.iter().enumerate().filter(|(_, row)| query.matches(row)).map(|(i, _)| i).collect();
        if matching.len() != 1 {
            return Err(StoreError::NotSingle(matching.len()));
        }

        let row = &mut rows[matching[0]];
        if let Value::Object(fields) = row {
            for (key, value) in patch {
                // Server-managed columns are not writable.
                if matches!(key.as_str(), "id" | "created_at" | "updated_at") {
                    continue;
                }
                fields.insert(key, value);
            }
            fields.insert("updated_at".to_string(), Value::String(now));
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: Table, query: &Query) -> Result<(), StoreError> {
        let mut state = self.enter()?;
        let rows = state.rows.entry(table).or_default();
        let removed: Vec<Value> = rows.iter().filter(|row| query.matches(row)).cloned().collect();
        rows.retain(|row| !query.matches(row));

        if table == Table::Projects {
            let project_ids: Vec<String> = removed.iter().filter_map(|row| row.get("id").and_then(Value::as_str)).map(str::to_string).collect();
            if let Some(tasks) = state.rows.get_mut(&Table::Tasks) {
                tasks.retain(|task| match task.get("project_id").and_then(Value::as_str) {
                    Some(project_id) => !project_ids.iter().any(|id| id == project_id),
                    None => true,
                });
            }
        }
        Ok(())
    }
}
