//! CLI for sitedl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use sitedl_core::config::ConfigFile;
use std::path::PathBuf;

use commands::{run_completions, run_domain, run_search, run_sites};

/// Top-level CLI for sitedl.
#[derive(Debug, Parser)]
#[command(name = "sitedl")]
#[command(about = "sitedl: follow moving streaming-site domains and download series and films", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check a site's stored domain and find the new one if it moved.
    Domain {
        /// Site name as configured under [sites.<name>].
        site: String,
    },

    /// Search a site's catalog and download the chosen titles.
    Search {
        /// Site name as configured under [sites.<name>].
        site: String,

        /// Catalog TOML to use instead of the site's configured one.
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// List configured sites and their stored domains.
    Sites,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let mut store = ConfigFile::open_default()?;
        tracing::debug!("loaded config: {:?}", store.config);

        match cli.command {
            CliCommand::Domain { site } => run_domain(&mut store, &site)?,
            CliCommand::Search { site, catalog } => {
                run_search(&mut store, &site, catalog.as_deref())?
            }
            CliCommand::Sites => run_sites(&store),
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
