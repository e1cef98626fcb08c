//! # taskflow
//!
//! Command-line client for a task and project manager whose rows and
//! accounts live in a hosted backend (GoTrue-style auth, PostgREST-style row
//! API).
//!
//! ## Layout
//!
//! - [`store`]: remote row store trait, the HTTP and in-memory stores, and
//!   the query cache
//! - [`data`]: task and project access with cache invalidation and
//!   notifications
//! - [`api`]: login and session caching
//! - [`libs`]: entities, filtering, forms, configuration, messages, views
//! - [`commands`]: the `clap` command tree

pub mod api;
pub mod commands;
pub mod data;
pub mod libs;
pub mod store;
