//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Feed refresh: re-fetches the default feeds and rewrites their cache
//!   entries at configured intervals

mod refresh;

pub use refresh::spawn_refresh_task;
