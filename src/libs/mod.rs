pub mod agenda;
pub mod config;
pub mod data_storage;
pub mod filter;
pub mod form;
pub mod messages;
pub mod notify;
pub mod project;
pub mod secret;
pub mod stats;
pub mod task;
pub mod view;
