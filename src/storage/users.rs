//! User account, preference, and read/favorite mark operations.
//!
//! Preference lists are stored as JSON text columns on the user row; the
//! read and favorite marks live in join tables keyed by (user, article).

use chrono::Utc;
use rusqlite::params;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{Article, Preferences, User};
use crate::storage::{parse_timestamp, Database};

const USER_COLUMNS: &str = "id, name, email, password_hash, categories, languages, created_at";

const ARTICLE_COLUMNS_QUALIFIED: &str = "a.id, a.source_id, a.source_name, a.author, a.title, \
     a.description, a.url, a.url_to_image, a.published_at, a.content, a.category, a.language, \
     a.country, a.created_at, a.updated_at";

impl Database {
    // == Create User ==
    /// Inserts a new account and returns it with its assigned id.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `email` - Unique login email
    /// * `password_hash` - Pre-hashed password, never plaintext
    /// * `preferences` - Initial category/language lists
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        preferences: &Preferences,
    ) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        let created_at = Utc::now();

        conn.execute(
            r#"
            INSERT INTO users (name, email, password_hash, categories, languages, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                name,
                email,
                password_hash,
                serde_json::to_string(&preferences.categories)?,
                serde_json::to_string(&preferences.languages)?,
                created_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!("Created user {} ({})", id, email);
        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            preferences: preferences.clone(),
            created_at,
        })
    }

    // == Find By Email ==
    /// Looks up an account by email, `None` if unknown.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users WHERE email = ?1",
            USER_COLUMNS
        ))?;
        let mut rows = stmt.query(params![email])?;

        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_user(row)?)),
            None => Ok(None),
        }
    }

    // == Find By Id ==
    /// Looks up an account by id, `None` if unknown.
    pub fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS))?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_user(row)?)),
            None => Ok(None),
        }
    }

    // == Preferences ==
    /// The preference lists stored for `user_id`.
    pub fn preferences(&self, user_id: i64) -> Result<Preferences> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT categories, languages FROM users WHERE id = ?1")?;
        let mut rows = stmt.query(params![user_id])?;

        let Some(row) = rows.next()? else {
            return Err(ApiError::NotFound("User not found".to_string()));
        };
        let categories: String = row.get(0)?;
        let languages: String = row.get(1)?;

        Ok(Preferences {
            categories: serde_json::from_str(&categories)?,
            languages: serde_json::from_str(&languages)?,
        })
    }

    // == Update Preferences ==
    /// Replaces whichever preference lists were provided and returns the
    /// resulting preferences. A `None` list is left untouched.
    pub fn update_preferences(
        &self,
        user_id: i64,
        categories: Option<&[String]>,
        languages: Option<&[String]>,
    ) -> Result<Preferences> {
        let current = self.preferences(user_id)?;

        let updated = Preferences {
            categories: categories.map(<[String]>::to_vec).unwrap_or(current.categories),
            languages: languages.map(<[String]>::to_vec).unwrap_or(current.languages),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE users SET categories = ?2, languages = ?3 WHERE id = ?1",
            params![
                user_id,
                serde_json::to_string(&updated.categories)?,
                serde_json::to_string(&updated.languages)?,
            ],
        )?;

        Ok(updated)
    }

    // == Mark Read ==
    /// Records that a user has read an article. Marking twice is a no-op.
    pub fn mark_read(&self, user_id: i64, article_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO user_reads (user_id, article_id, marked_at) VALUES (?1, ?2, ?3)",
            params![user_id, article_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // == Mark Favorite ==
    /// Records a favorite mark. Marking twice is a no-op.
    pub fn mark_favorite(&self, user_id: i64, article_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO user_favorites (user_id, article_id, marked_at) VALUES (?1, ?2, ?3)",
            params![user_id, article_id, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // == Read Marks ==
    /// Ids of the articles this user has marked read, oldest mark first.
    pub fn read_article_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.marked_ids(user_id, "user_reads")
    }

    /// The read-marked articles themselves, oldest mark first.
    pub fn read_articles(&self, user_id: i64) -> Result<Vec<Article>> {
        self.marked_articles(user_id, "user_reads")
    }

    // == Favorite Marks ==
    /// Ids of the articles this user has favorited, oldest mark first.
    pub fn favorite_article_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.marked_ids(user_id, "user_favorites")
    }

    /// The favorited articles themselves, oldest mark first.
    pub fn favorite_articles(&self, user_id: i64) -> Result<Vec<Article>> {
        self.marked_articles(user_id, "user_favorites")
    }

    // == Shared Mark Queries ==
    fn marked_ids(&self, user_id: i64, table: &str) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT article_id FROM {} WHERE user_id = ?1 ORDER BY marked_at, article_id",
            table
        ))?;
        let mut rows = stmt.query(params![user_id])?;

        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }

    fn marked_articles(&self, user_id: i64, table: &str) -> Result<Vec<Article>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {cols} FROM articles a
             JOIN {table} m ON m.article_id = a.id
             WHERE m.user_id = ?1
             ORDER BY m.marked_at, m.article_id",
            cols = ARTICLE_COLUMNS_QUALIFIED,
            table = table
        ))?;
        let mut rows = stmt.query(params![user_id])?;

        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(Self::row_to_article(row)?);
        }
        Ok(articles)
    }

    // == Row Mapping ==
    /// Converts a row selected with `USER_COLUMNS` into a `User`.
    fn row_to_user(row: &rusqlite::Row) -> Result<User> {
        let categories: String = row.get(4)?;
        let languages: String = row.get(5)?;
        let created_at: String = row.get(6)?;

        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            preferences: Preferences {
                categories: serde_json::from_str(&categories)?,
                languages: serde_json::from_str(&languages)?,
            },
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleSource, FetchedArticle};

    fn seed_user(db: &Database) -> User {
        db.create_user(
            "Ada",
            "ada@example.com",
            "salt$digest",
            &Preferences::default(),
        )
        .unwrap()
    }

    fn seed_article(db: &Database, url: &str) -> i64 {
        let batch = vec![FetchedArticle {
            source: ArticleSource {
                id: None,
                name: "Wire".to_string(),
            },
            title: Some("Story".to_string()),
            url: Some(url.to_string()),
            ..FetchedArticle::default()
        }];
        db.upsert_articles(&batch, "general", "en", "us");

        let conn = db.conn.lock().unwrap();
        conn.query_row(
            "SELECT id FROM articles WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_find_user() {
        let db = Database::open_in_memory().unwrap();
        let created = seed_user(&db);

        let by_email = db.find_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.name, "Ada");
        assert_eq!(by_email.preferences.categories, vec!["general".to_string()]);

        let by_id = db.find_user_by_id(created.id).unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");

        assert!(db.find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = Database::open_in_memory().unwrap();
        seed_user(&db);

        let result = db.create_user("Imposter", "ada@example.com", "x$y", &Preferences::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_update_preferences_replaces_only_given_lists() {
        let db = Database::open_in_memory().unwrap();
        let user = seed_user(&db);

        let categories = vec!["business".to_string(), "technology".to_string()];
        let updated = db
            .update_preferences(user.id, Some(&categories), None)
            .unwrap();
        assert_eq!(updated.categories, categories);
        assert_eq!(updated.languages, vec!["en".to_string()]);

        let languages = vec!["fr".to_string()];
        let updated = db.update_preferences(user.id, None, Some(&languages)).unwrap();
        assert_eq!(updated.categories, categories, "categories must survive");
        assert_eq!(updated.languages, languages);

        let reloaded = db.find_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(reloaded.preferences.categories, categories);
        assert_eq!(reloaded.preferences.languages, languages);
    }

    #[test]
    fn test_preferences_getter_matches_stored_lists() {
        let db = Database::open_in_memory().unwrap();
        let user = seed_user(&db);

        assert_eq!(db.preferences(user.id).unwrap(), Preferences::default());

        db.update_preferences(user.id, None, Some(&["de".to_string()]))
            .unwrap();
        assert_eq!(
            db.preferences(user.id).unwrap().languages,
            vec!["de".to_string()]
        );
    }

    #[test]
    fn test_update_preferences_unknown_user() {
        let db = Database::open_in_memory().unwrap();

        assert!(matches!(db.preferences(42), Err(ApiError::NotFound(_))));

        let result = db.update_preferences(42, Some(&["general".to_string()]), None);
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let user = seed_user(&db);
        let article = seed_article(&db, "https://example.com/story");

        db.mark_read(user.id, article).unwrap();
        db.mark_read(user.id, article).unwrap();

        assert_eq!(db.read_article_ids(user.id).unwrap(), vec![article]);
        let articles = db.read_articles(user.id).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Story");
    }

    #[test]
    fn test_favorites_are_separate_from_reads() {
        let db = Database::open_in_memory().unwrap();
        let user = seed_user(&db);
        let first = seed_article(&db, "https://example.com/a");
        let second = seed_article(&db, "https://example.com/b");

        db.mark_read(user.id, first).unwrap();
        db.mark_favorite(user.id, second).unwrap();

        assert_eq!(db.read_article_ids(user.id).unwrap(), vec![first]);
        assert_eq!(db.favorite_article_ids(user.id).unwrap(), vec![second]);
        assert_eq!(db.favorite_articles(user.id).unwrap().len(), 1);
    }
}
