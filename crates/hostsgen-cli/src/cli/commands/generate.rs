//! `hostsgen generate [--dir a,b]` – fetch all sources and write the merged hosts file.

use anyhow::{bail, Context, Result};
use hostsgen_core::artifact::TIMESTAMP_FORMAT;
use hostsgen_core::config::HostsgenConfig;
use hostsgen_core::fetch::CurlFetcher;
use hostsgen_core::generate::{self, GenerateReport, SourceOutcome};
use hostsgen_core::registry::SourceRegistry;
use std::path::PathBuf;

/// Directories to write to: `--dir` wins, then config `output_dirs`, then the
/// current directory (applied by the engine when the list is empty).
pub(crate) fn resolve_output_dirs(cli_dirs: Vec<PathBuf>, cfg: &HostsgenConfig) -> Vec<PathBuf> {
    if cli_dirs.is_empty() {
        cfg.output_dirs.clone()
    } else {
        cli_dirs
    }
}

pub async fn run_generate<R: SourceRegistry>(
    registry: &R,
    cfg: &HostsgenConfig,
    dirs: Vec<PathBuf>,
) -> Result<()> {
    let sources = registry
        .list_sources()
        .await
        .context("failed to read source registry")?;
    if sources.is_empty() {
        println!("No sources configured; the hosts file will only contain localhost entries.");
    }

    let dirs = resolve_output_dirs(dirs, cfg);
    let fetcher = CurlFetcher::new(cfg.fetch.clone());
    let report = tokio::task::spawn_blocking(move || {
        generate::generate(&fetcher, &sources, &dirs)
    })
    .await
    .context("generation task failed")?;

    print_report(&report);

    if !report.write_failures.is_empty() {
        bail!(
            "hosts file not written to {} of {} directories",
            report.write_failures.len(),
            report.write_failures.len() + report.written.len()
        );
    }
    Ok(())
}

fn print_report(report: &GenerateReport) {
    for source in &report.sources {
        match &source.outcome {
            SourceOutcome::Fetched(stats) => println!(
                "Fetched {}: {} entries ({} new)",
                source.url, stats.entries, stats.added
            ),
            SourceOutcome::Unreachable(err) => println!("Unable to reach: {} ({})", source.url, err),
        }
    }
    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    for (dir, err) in &report.write_failures {
        eprintln!("Failed to write hosts file in {}: {}", dir.display(), err);
    }
    println!("{}", summary_line(report));
}

pub(crate) fn summary_line(report: &GenerateReport) -> String {
    format!(
        "Generated at {}: {} unique entries from {} of {} sources",
        report.generated_at.format(TIMESTAMP_FORMAT),
        report.unique_entries,
        report.reachable_count(),
        report.sources.len()
    )
}
