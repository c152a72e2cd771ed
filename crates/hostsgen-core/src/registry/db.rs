//! SQLite-backed source registry: connection, migrations, first-run seeding.
//!
//! CRUD lives in `sources`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default database location: `~/.local/state/hostsgen/sources.db`.
pub fn default_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hostsgen")?;
    Ok(xdg_dirs.get_state_home().join("hostsgen").join("sources.db"))
}

/// Handle to the SQLite-backed source registry.
#[derive(Clone)]
pub struct SourceDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl SourceDb {
    /// Open (or create) the default registry. `seed` is inserted only when the
    /// sources table is created for the first time.
    pub async fn open_default(seed: &[String]) -> Result<Self> {
        Self::open_at(default_path()?, seed).await
    }

    /// Open (or create) the registry at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>, seed: &[String]) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open source registry {}", path.display()))?;

        let db = SourceDb { pool };
        db.migrate(seed)
            .await
            .with_context(|| format!("source registry {} is unusable", path.display()))?;
        Ok(db)
    }

    async fn migrate(&self, seed: &[String]) -> Result<()> {
        let existing: Option<String> = sqlx::query_scalar(
            r#"SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sources'"#,
        )
        .fetch_optional(&self.pool)
        .await?;

        // `id` only orders the list; the URL is the key.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sources (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL UNIQUE,
                added_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        if existing.is_none() {
            for url in seed {
                self.insert(url).await?;
            }
            tracing::info!(seeded = seed.len(), "created source registry");
        }

        Ok(())
    }
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory(seed: &[String]) -> Result<SourceDb> {
    // Single connection to avoid the pool handing back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = SourceDb { pool };
    db.migrate(seed).await?;
    Ok(db)
}
