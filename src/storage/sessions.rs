//! Bearer session operations.
//!
//! A session row maps a token hash to a user id with an expiry instant.
//! Only the hash of a token is ever stored; the token itself exists
//! nowhere but in the client's hands.

use chrono::{Duration, Utc};
use rusqlite::params;
use tracing::debug;

use crate::error::Result;
use crate::storage::{parse_timestamp, Database};

impl Database {
    // == Insert Session ==
    /// Stores a new session for `user_id` expiring `ttl_seconds` from now.
    pub fn insert_session(&self, token_hash: &str, user_id: i64, ttl_seconds: u64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();
        let expires_at = now + Duration::seconds(ttl_seconds as i64);

        conn.execute(
            r#"
            INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                token_hash,
                user_id,
                now.to_rfc3339(),
                expires_at.to_rfc3339(),
            ],
        )?;

        debug!("Opened session for user {}", user_id);
        Ok(())
    }

    // == Find Session ==
    /// Resolves a token hash to the owning user id.
    ///
    /// An expired session is removed on lookup and reported as absent, so
    /// stale rows clean themselves up the first time someone presents the
    /// dead token.
    pub fn find_session(&self, token_hash: &str) -> Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();

        let row: Option<(i64, String)> = conn
            .query_row(
                "SELECT user_id, expires_at FROM sessions WHERE token_hash = ?1",
                params![token_hash],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let Some((user_id, expires_at)) = row else {
            return Ok(None);
        };

        if Utc::now() > parse_timestamp(&expires_at)? {
            conn.execute(
                "DELETE FROM sessions WHERE token_hash = ?1",
                params![token_hash],
            )?;
            debug!("Removed expired session for user {}", user_id);
            return Ok(None);
        }

        Ok(Some(user_id))
    }

    // == Delete Session ==
    /// Removes a session outright; true if one existed.
    pub fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();

        let affected = conn.execute(
            "DELETE FROM sessions WHERE token_hash = ?1",
            params![token_hash],
        )?;
        Ok(affected > 0)
    }
}
