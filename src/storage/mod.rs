//! Storage Module
//!
//! Embedded SQLite persistence for users, articles, sessions, and per-user
//! read/favorite marks. One `Database` struct owns the connection; the
//! operation groups live in `articles`, `users`, and `sessions`.

mod articles;
mod sessions;
mod users;

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::info;

use crate::error::{ApiError, Result};

/// Parses an RFC 3339 timestamp column back into a `DateTime<Utc>`.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::Internal(format!("Invalid timestamp in database: {}", e)))
}

// == Database ==
/// SQLite-backed store shared by the request handlers.
///
/// The connection sits behind a `Mutex`; every operation locks, runs its
/// statements, and releases before returning. Queries here are small and
/// indexed, so no handler holds the lock for long.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    // == Open ==
    /// Opens (or creates) the database file at `path` and ensures the
    /// schema exists.
    ///
    /// # Arguments
    /// * `path` - Filesystem location of the SQLite database
    ///
    /// # Returns
    /// * `Result<Self>` - The ready-to-use store, or a storage error
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;

        info!("Database opened at {:?}", path);
        Ok(db)
    }

    // == Open In-Memory ==
    /// Creates a fresh in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize()?;

        Ok(db)
    }

    // == Schema ==
    /// Applies pragmas and creates the schema if it is not there yet.
    /// Safe to run against an already-initialized database.
    fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                categories TEXT NOT NULL DEFAULT '["general"]',
                languages TEXT NOT NULL DEFAULT '["en"]',
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id TEXT,
                source_name TEXT NOT NULL DEFAULT 'Unknown',
                author TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                url TEXT NOT NULL UNIQUE,
                url_to_image TEXT NOT NULL DEFAULT '',
                published_at TEXT,
                content TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                language TEXT NOT NULL DEFAULT '',
                country TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_articles_published_at
                ON articles(published_at DESC);

            CREATE TABLE IF NOT EXISTS sessions (
                token_hash TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_reads (
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
                marked_at TEXT NOT NULL,
                PRIMARY KEY (user_id, article_id)
            );

            CREATE TABLE IF NOT EXISTS user_favorites (
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
                marked_at TEXT NOT NULL,
                PRIMARY KEY (user_id, article_id)
            );
            "#,
        )?;

        Ok(())
    }
}
