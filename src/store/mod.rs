//! Remote row store access.
//!
//! The backend exposes each collection as a table of JSON rows with
//! row-level CRUD. This module defines the contract the data layer relies on
//! and its implementations:
//!
//! - [`rest::RestStore`]: HTTP client for a PostgREST-compatible endpoint
//! - [`memory::MemoryStore`]: in-process store with the same semantics
//! - [`cache::QueryCache`]: the keyed query cache shared by the data hooks
//!
//! ## Contract
//!
//! - `select` applies equality filters and an optional ordering
//! - `insert` and `update` return exactly one affected row, or fail
//! - `delete` removes every matching row
//! - no transactions, no batch operations, no retries

use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub mod cache;
pub mod memory;
pub mod query;
pub mod rest;

pub use query::{Order, Query};

/// Collections used by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tasks,
    Projects,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Projects => "projects",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected the operation; the message is the server's own.
    #[error("{0}")]
    Remote(String),
    #[error("Session expired or missing, please log in again")]
    Unauthorized,
    #[error("Expected a single row, got {0}")]
    NotSingle(usize),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Row-level CRUD against the remote store.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Returns all rows of `table` matching `query`, in the requested order.
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Inserts one row and returns it as stored, with server-assigned fields.
    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError>;

    /// Applies `patch` to the single row matching `query` and returns it.
    ///
    /// Only the keys present in `patch` change.
    async fn update(&self, table: Table, query: &Query, patch: Value) -> Result<Value, StoreError>;

    async fn delete(&self, table: Table, query: &Query) -> Result<(), StoreError>;
}
