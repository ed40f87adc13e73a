//! `opskit fetch` – one artifact from an ordered list of sources.

use anyhow::{bail, Context, Result};
use opskit_core::config::OpskitConfig;
use opskit_core::driver::run_tasks;
use opskit_core::fallback::FetchOptions;
use opskit_core::source::{SourceSpec, Task};
use opskit_core::url_model;
use std::path::{Path, PathBuf};

use super::report::ConsoleObserver;

/// Output path: explicit, else derived from the first URL source.
pub(crate) fn output_path(output: Option<&Path>, sources: &[SourceSpec]) -> Result<PathBuf> {
    if let Some(p) = output {
        return Ok(p.to_path_buf());
    }
    let first_url = sources.iter().find_map(|s| match s {
        SourceSpec::Http(url) => Some(url.as_str()),
        SourceSpec::Command(_) => None,
    });
    match first_url {
        Some(url) => Ok(PathBuf::from(url_model::derive_filename(url))),
        None => bail!("--output is required when no URL source is given"),
    }
}

pub async fn run_fetch(cfg: &OpskitConfig, output: Option<&Path>, raw_sources: &[String]) -> Result<()> {
    let sources = raw_sources
        .iter()
        .map(|s| s.parse::<SourceSpec>())
        .collect::<Result<Vec<_>>>()?;
    let out = output_path(output, &sources)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let name = out.display().to_string();
    let task = Task::new(name, sources, &out)?;

    let opts = FetchOptions {
        download: (&cfg.http).into(),
        command_timeout: cfg.sysinfo.command_timeout(),
    };
    let mut observer = ConsoleObserver::default();
    let reports = run_tasks(std::slice::from_ref(&task), &opts, &mut observer).await;
    if !reports.iter().all(|r| r.succeeded) {
        bail!("all {} source(s) failed for {}", task.sources().len(), out.display());
    }
    Ok(())
}
