//! Sysinfo sweep: run the command catalog into a fresh directory, then summarize.

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CollectorCommand;
use crate::collector::{self, CollectObserver, CommandStatus};
use crate::run_dir;
use crate::summary::{self, HostFacts};

/// Result of a sysinfo run.
#[derive(Debug, Clone)]
pub struct SysinfoRun {
    pub output_dir: PathBuf,
    pub statuses: Vec<CommandStatus>,
    /// `None` when the summary could not be written.
    pub summary_path: Option<PathBuf>,
}

/// Checks that `base_dir` exists (fatal otherwise), creates `output_dir`, runs
/// `entries` in order, and writes the summary file.
pub async fn run_sysinfo(
    base_dir: &Path,
    output_dir: &Path,
    entries: &[CollectorCommand],
    timeout: Duration,
    observer: &mut dyn CollectObserver,
) -> Result<SysinfoRun> {
    run_dir::ensure_base_dir(base_dir)?;
    run_dir::create_run_dir(output_dir)?;
    tracing::info!(dir = %output_dir.display(), commands = entries.len(), "sysinfo sweep started");

    let statuses = collector::collect(entries, output_dir, timeout, observer).await;

    let facts = HostFacts::gather().await;
    let summary_path = match summary::write_summary(output_dir, &facts, Utc::now()) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!("failed to write summary: {:#}", e);
            None
        }
    };

    Ok(SysinfoRun {
        output_dir: output_dir.to_path_buf(),
        statuses,
        summary_path,
    })
}
