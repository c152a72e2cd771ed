//! `hostsgen list` – show registered sources.

use anyhow::Result;
use hostsgen_core::registry::SourceRegistry;

pub async fn run_list<R: SourceRegistry>(registry: &R) -> Result<()> {
    let sources = registry.list_sources().await?;
    if sources.is_empty() {
        println!("No sources configured.");
    } else {
        println!("Sources:");
        for url in sources {
            println!("\t{url}");
        }
    }
    Ok(())
}
