//! `hostsgen add <url>[,<url>...]` – register new sources.

use anyhow::Result;
use hostsgen_core::registry::{validate_source_url, SourceRegistry};

/// Adds each URL; existing and invalid URLs are reported and skipped.
/// Returns the number of sources actually added.
pub async fn run_add<R: SourceRegistry>(registry: &R, urls: &[String]) -> Result<usize> {
    let mut added = 0;
    for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        if let Err(e) = validate_source_url(url) {
            println!("Invalid source URL: {url} ({e:#})");
            continue;
        }
        if registry.add_source(url).await? {
            println!("Added source: {url}");
            added += 1;
        } else {
            println!("Source: {url} already exists!");
        }
    }
    Ok(added)
}
