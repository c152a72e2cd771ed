//! Source CRUD on the SQLite registry.

use anyhow::Result;

use super::db::{unix_timestamp, SourceDb};
use super::SourceRegistry;

impl SourceDb {
    pub(crate) async fn insert(&self, url: &str) -> Result<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO sources (url, added_at)
            VALUES (?1, ?2)
            "#,
        )
        .bind(url)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }
}

impl SourceRegistry for SourceDb {
    async fn list_sources(&self) -> Result<Vec<String>> {
        let urls: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT url
            FROM sources
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(urls)
    }

    async fn add_source(&self, url: &str) -> Result<bool> {
        let added = self.insert(url).await?;
        if added {
            tracing::info!(url, "added source");
        }
        Ok(added)
    }

    async fn remove_source(&self, url: &str) -> Result<bool> {
        let removed = sqlx::query(
            r#"
            DELETE FROM sources
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if removed > 0 {
            tracing::info!(url, "removed source");
        }
        Ok(removed > 0)
    }

    async fn source_exists(&self, url: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM sources
            WHERE url = ?1
            "#,
        )
        .bind(url)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }
}
