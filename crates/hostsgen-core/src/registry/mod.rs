//! Persistent registry of blocklist source URLs (SQLite via sqlx).
//!
//! The merge engine only needs [`SourceRegistry::list_sources`]; the CLI uses the
//! rest for add/remove. [`MemoryRegistry`] is an in-process stand-in for tests.

pub mod db;
pub mod memory;
mod sources;

pub use db::SourceDb;
pub use memory::MemoryRegistry;

use anyhow::{bail, Context, Result};

/// Ordered collection of source URLs. The URL is its own key.
#[allow(async_fn_in_trait)]
pub trait SourceRegistry {
    /// All sources in insertion order.
    async fn list_sources(&self) -> Result<Vec<String>>;

    /// Insert `url`. Returns false if it was already present.
    async fn add_source(&self, url: &str) -> Result<bool>;

    /// Delete `url`. Returns false if it was not present.
    async fn remove_source(&self, url: &str) -> Result<bool>;

    async fn source_exists(&self, url: &str) -> Result<bool>;
}

/// Accept only absolute `http` / `https` URLs as sources.
pub fn validate_source_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).with_context(|| format!("not a valid URL: {raw}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported scheme {other:?} (expected http or https)"),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        bail!("URL has no host");
    }
    Ok(())
}
