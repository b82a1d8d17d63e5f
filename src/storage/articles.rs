//! Article persistence operations.
//!
//! Articles are keyed by URL: fetching the same story twice updates the
//! existing row instead of inserting a duplicate.

use chrono::Utc;
use rusqlite::params;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Article, ArticleSource, FetchedArticle};
use crate::storage::{parse_timestamp, Database};

const ARTICLE_COLUMNS: &str = "id, source_id, source_name, author, title, description, url, \
     url_to_image, published_at, content, category, language, country, created_at, updated_at";

const UPSERT_SQL: &str = r#"
    INSERT INTO articles (
        source_id, source_name, author, title, description, url, url_to_image,
        published_at, content, category, language, country, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
    ON CONFLICT(url) DO UPDATE SET
        source_id = excluded.source_id,
        source_name = excluded.source_name,
        author = excluded.author,
        title = excluded.title,
        description = excluded.description,
        url_to_image = excluded.url_to_image,
        published_at = excluded.published_at,
        content = excluded.content,
        category = COALESCE(NULLIF(excluded.category, ''), articles.category),
        language = COALESCE(NULLIF(excluded.language, ''), articles.language),
        country = COALESCE(NULLIF(excluded.country, ''), articles.country),
        updated_at = excluded.updated_at
"#;

impl Database {
    // == Upsert Articles ==
    /// Writes a batch of fetched articles, insert-or-update by URL.
    ///
    /// Rows without a URL or title are skipped; the category, language and
    /// country tags record the query the batch was fetched for, and an
    /// empty tag never overwrites a tag already on the row. Failures are
    /// logged and swallowed so a bad row can never fail the request that
    /// triggered the fetch.
    ///
    /// # Returns
    /// * `usize` - Number of rows written
    pub fn upsert_articles(
        &self,
        articles: &[FetchedArticle],
        category: &str,
        language: &str,
        country: &str,
    ) -> usize {
        let conn = self.conn.lock().unwrap();
        let mut stmt = match conn.prepare(UPSERT_SQL) {
            Ok(stmt) => stmt,
            Err(e) => {
                warn!("Article upsert unavailable: {}", e);
                return 0;
            }
        };

        let now = Utc::now().to_rfc3339();
        let mut written = 0;

        for article in articles {
            let (Some(url), Some(title)) = (&article.url, &article.title) else {
                continue;
            };

            let result = stmt.execute(params![
                article.source.id,
                article.source.name,
                article.author.clone().unwrap_or_default(),
                title,
                article.description.clone().unwrap_or_default(),
                url,
                article.url_to_image.clone().unwrap_or_default(),
                article.published_at.map(|dt| dt.to_rfc3339()),
                article.content.clone().unwrap_or_default(),
                category,
                language,
                country,
                now,
                now,
            ]);

            match result {
                Ok(_) => written += 1,
                Err(e) => warn!("Skipping article {}: {}", url, e),
            }
        }

        if written > 0 {
            debug!("Upserted {} articles", written);
        }
        written
    }

    // == Recent Articles ==
    /// Returns persisted articles newest first by publication time.
    pub fn recent_articles(&self, limit: u32) -> Result<Vec<Article>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM articles ORDER BY published_at DESC LIMIT ?1",
            ARTICLE_COLUMNS
        ))?;

        let mut rows = stmt.query(params![limit as i64])?;
        let mut articles = Vec::new();
        while let Some(row) = rows.next()? {
            articles.push(Self::row_to_article(row)?);
        }

        Ok(articles)
    }

    // == Article Exists ==
    /// True if an article row with this id exists.
    pub fn article_exists(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    // == Row Mapping ==
    /// Converts a row selected with `ARTICLE_COLUMNS` into an `Article`.
    pub(crate) fn row_to_article(row: &rusqlite::Row) -> Result<Article> {
        let published_at: Option<String> = row.get(8)?;
        let created_at: String = row.get(13)?;
        let updated_at: String = row.get(14)?;

        Ok(Article {
            id: row.get(0)?,
            source: ArticleSource {
                id: row.get(1)?,
                name: row.get(2)?,
            },
            author: row.get(3)?,
            title: row.get(4)?,
            description: row.get(5)?,
            url: row.get(6)?,
            url_to_image: row.get(7)?,
            published_at: published_at.as_deref().map(parse_timestamp).transpose()?,
            content: row.get(9)?,
            category: row.get(10)?,
            language: row.get(11)?,
            country: row.get(12)?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}
