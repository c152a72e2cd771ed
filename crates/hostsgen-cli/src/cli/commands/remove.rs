//! `hostsgen remove <url>[,<url>...]` – unregister sources.

use anyhow::Result;
use hostsgen_core::registry::SourceRegistry;

/// Returns the number of sources actually removed.
pub async fn run_remove<R: SourceRegistry>(registry: &R, urls: &[String]) -> Result<usize> {
    let mut removed = 0;
    for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        if registry.remove_source(url).await? {
            println!("Removed source: {url}");
            removed += 1;
        } else {
            println!("Source: {url} does not exist");
        }
    }
    Ok(removed)
}
