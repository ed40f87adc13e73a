//! CLI for the opskit operator tools.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use opskit_core::{catalog, config};
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_headers, run_post, run_sysinfo, run_wordlists};

/// Top-level CLI for opskit.
#[derive(Debug, Parser)]
#[command(name = "opskit")]
#[command(about = "opskit: header fetcher, POST demo, wordlist mirror, and sysinfo collector", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the response headers of a URL.
    Headers {
        /// URL to request.
        #[arg(default_value = catalog::DEFAULT_HEADERS_URL)]
        url: String,
    },

    /// POST a JSON body with custom headers and print the response.
    Post {
        /// URL to post to.
        #[arg(default_value = catalog::DEFAULT_POST_URL)]
        url: String,
        /// Extra header as `Name: value` (repeatable; replaces the built-in set).
        #[arg(long = "header", short = 'H', value_name = "NAME: VALUE")]
        headers: Vec<String>,
        /// JSON body (defaults to the built-in payload).
        #[arg(long, value_name = "JSON")]
        data: Option<String>,
    },

    /// Download the security wordlists from GitHub raw URLs.
    Wordlists {
        /// Target directory (overrides config).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Fetch one artifact, trying each source in order until one succeeds.
    Fetch {
        /// Output path (default: derived from the first URL source).
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
        /// Sources: http(s) URLs or `cmd:<shell command>`.
        #[arg(required = true, value_name = "SOURCE")]
        sources: Vec<String>,
    },

    /// Collect Linux system information into a fresh output directory.
    Sysinfo {
        /// Existing base directory for the run directory (overrides config).
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Per-command timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_default()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Headers { url } => run_headers(&url, cfg.probe.timeout()).await?,
            CliCommand::Post { url, headers, data } => {
                run_post(&url, &headers, data.as_deref(), cfg.probe.timeout()).await?
            }
            CliCommand::Wordlists { dir } => {
                if let Some(dir) = dir {
                    cfg.wordlists.dir = dir;
                }
                run_wordlists(&cfg).await?
            }
            CliCommand::Fetch { output, sources } => {
                run_fetch(&cfg, output.as_deref(), &sources).await?
            }
            CliCommand::Sysinfo { base_dir, timeout } => {
                if let Some(base) = base_dir {
                    cfg.sysinfo.base_dir = base;
                }
                if let Some(secs) = timeout {
                    cfg.sysinfo.command_timeout_secs = secs;
                }
                run_sysinfo(&cfg).await?
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
