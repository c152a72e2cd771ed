//! CLI for hostsgen.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hostsgen_core::config;
use hostsgen_core::registry::SourceDb;
use std::path::PathBuf;

use commands::{run_add, run_generate, run_list, run_remove};

/// Top-level CLI for hostsgen.
#[derive(Debug, Parser)]
#[command(name = "hostsgen")]
#[command(
    about = "Merge remotely hosted blocklists into one deduplicated hosts file",
    long_about = None
)]
pub struct Cli {
    /// Source registry database (default: ~/.local/state/hostsgen/sources.db).
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add hosts sources (comma-separated or repeated).
    Add {
        /// HTTP/HTTPS URL of a hosts-format blocklist.
        #[arg(required = true, value_delimiter = ',', value_name = "URL")]
        urls: Vec<String>,
    },

    /// Remove hosts sources (comma-separated or repeated).
    Remove {
        /// Source URL exactly as it was added.
        #[arg(required = true, value_delimiter = ',', value_name = "URL")]
        urls: Vec<String>,
    },

    /// List the registered sources.
    List,

    /// Fetch every source and write the merged hosts file.
    #[command(alias = "gen")]
    Generate {
        /// Directories to write `hosts` into (comma-separated). Defaults to
        /// `output_dirs` from the config, then the current directory.
        #[arg(long = "dir", value_delimiter = ',', value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let db = match &cli.registry {
            Some(path) => SourceDb::open_at(path, &cfg.default_sources).await?,
            None => SourceDb::open_default(&cfg.default_sources).await?,
        };

        match cli.command {
            CliCommand::Add { urls } => {
                run_add(&db, &urls).await?;
            }
            CliCommand::Remove { urls } => {
                run_remove(&db, &urls).await?;
            }
            CliCommand::List => run_list(&db).await?,
            CliCommand::Generate { dirs } => run_generate(&db, &cfg, dirs).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
