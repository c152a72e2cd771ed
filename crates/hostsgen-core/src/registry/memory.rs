//! In-memory registry with the same semantics as the SQLite store.

use anyhow::{anyhow, Result};
use std::sync::{Mutex, MutexGuard};

use super::SourceRegistry;

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sources: Mutex<Vec<String>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `seed` (duplicates dropped, order kept).
    pub fn with_sources<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sources: Vec<String> = Vec::new();
        for url in seed {
            let url = url.into();
            if !sources.contains(&url) {
                sources.push(url);
            }
        }
        Self {
            sources: Mutex::new(sources),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<String>>> {
        self.sources
            .lock()
            .map_err(|_| anyhow!("source registry lock poisoned"))
    }
}

impl SourceRegistry for MemoryRegistry {
    async fn list_sources(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.clone())
    }

    async fn add_source(&self, url: &str) -> Result<bool> {
        let mut sources = self.lock()?;
        if sources.iter().any(|s| s == url) {
            return Ok(false);
        }
        sources.push(url.to_string());
        Ok(true)
    }

    async fn remove_source(&self, url: &str) -> Result<bool> {
        let mut sources = self.lock()?;
        let before = sources.len();
        sources.retain(|s| s != url);
        Ok(sources.len() != before)
    }

    async fn source_exists(&self, url: &str) -> Result<bool> {
        Ok(self.lock()?.iter().any(|s| s == url))
    }
}
