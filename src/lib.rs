//! Newswire - a personalized news feed backend
//!
//! Aggregates upstream headlines into per-user feeds with TTL caching,
//! embedded persistence, and bearer-token accounts.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_refresh_task;
