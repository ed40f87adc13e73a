//! Sequential fallback fetcher.
//!
//! Tries a task's sources in order and stops at the first success. Every
//! success lands on disk through a part file and rename; every failure is
//! recorded and the next source is tried. Nothing here aborts a run.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::FetchError;
use crate::http::{self, DownloadOptions, TransferProgress};
use crate::shell;
use crate::source::{AttemptResult, SourceSpec, Task};
use crate::storage;

/// Bounds applied to each source attempt.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub download: DownloadOptions,
    /// Wall-clock limit for command sources.
    pub command_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            download: DownloadOptions::default(),
            command_timeout: Duration::from_secs(60),
        }
    }
}

/// Hooks called around each attempt (console output, test recording).
pub trait AttemptObserver {
    fn attempt_started(&mut self, _task: &Task, _source: &SourceSpec) {}
    /// Byte progress of an HTTP attempt in flight.
    fn attempt_progress(&mut self, _task: &Task, _progress: &TransferProgress) {}
    fn attempt_finished(&mut self, _task: &Task, _result: &AttemptResult) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl AttemptObserver for NoopObserver {}

/// Runs the task's sources in order until one succeeds. Returns true iff a source succeeded.
/// `attempts_out` receives one `AttemptResult` per source tried.
pub async fn fetch_with_fallback(
    task: &Task,
    opts: &FetchOptions,
    attempts_out: &mut Vec<AttemptResult>,
) -> bool {
    fetch_with_fallback_observed(task, opts, &mut NoopObserver, attempts_out).await
}

/// Like `fetch_with_fallback`, reporting each attempt to `observer`.
pub async fn fetch_with_fallback_observed(
    task: &Task,
    opts: &FetchOptions,
    observer: &mut dyn AttemptObserver,
    attempts_out: &mut Vec<AttemptResult>,
) -> bool {
    for source in task.sources() {
        observer.attempt_started(task, source);
        let result = match attempt(task, source, opts, observer).await {
            Ok(bytes) => AttemptResult::success(source, bytes),
            Err(e) => {
                tracing::warn!(
                    task = task.target_name(),
                    source = %source,
                    "attempt failed: {}",
                    e
                );
                AttemptResult::failure(source, e)
            }
        };
        observer.attempt_finished(task, &result);
        let succeeded = result.succeeded;
        attempts_out.push(result);
        if succeeded {
            tracing::info!(
                task = task.target_name(),
                source = %source,
                "saved {}",
                task.output_path().display()
            );
            return true;
        }
    }
    tracing::warn!(
        task = task.target_name(),
        "all {} source(s) failed",
        task.sources().len()
    );
    false
}

/// One source attempt. Ok carries the number of bytes in the final file.
async fn attempt(
    task: &Task,
    source: &SourceSpec,
    opts: &FetchOptions,
    observer: &mut dyn AttemptObserver,
) -> Result<u64, FetchError> {
    let output_path = task.output_path();
    match source {
        SourceSpec::Http(url) => {
            let url = url.clone();
            let out = output_path.to_path_buf();
            let download = opts.download.clone();
            let (tx, mut rx) = mpsc::unbounded_channel();
            let mut handle = tokio::task::spawn_blocking(move || {
                http::download_with_progress(&url, &out, &download, |p| {
                    let _ = tx.send(p);
                })
            });
            loop {
                tokio::select! {
                    Some(p) = rx.recv() => observer.attempt_progress(task, &p),
                    joined = &mut handle => {
                        while let Ok(p) = rx.try_recv() {
                            observer.attempt_progress(task, &p);
                        }
                        return joined
                            .map_err(|e| FetchError::Process(format!("download task failed: {}", e)))?;
                    }
                }
            }
        }
        SourceSpec::Command(cmd) => {
            let out = shell::run_shell(cmd, opts.command_timeout)
                .await
                .map_err(|e| FetchError::Process(format!("could not run command: {}", e)))?;
            if out.timed_out {
                return Err(FetchError::Timeout(opts.command_timeout));
            }
            if let Some(reason) = out.failure_reason(opts.command_timeout) {
                return Err(FetchError::Process(reason));
            }
            Ok(storage::write_atomic(output_path, out.output.as_bytes())?)
        }
    }
}
