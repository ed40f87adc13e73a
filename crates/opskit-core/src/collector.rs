//! Single-command runner for the sysinfo sweep: no fallback, append-only output.
//!
//! Each command gets a header block in its category file followed by its
//! combined output. Failures are written into the file as `[ERROR]` lines and
//! never stop the sweep.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::catalog::CollectorCommand;
use crate::shell;

/// Width of the `=` rule under each header.
const RULE_WIDTH: usize = 43;

/// How one command ended, for console and log reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// Exited with status 0.
    Ok,
    /// Ran but exited non-zero or by signal.
    Failed(String),
    /// Killed after the timeout.
    TimedOut,
    /// Shell could not be started.
    SpawnError(String),
}

/// Header block written before each command's output.
pub fn header(description: &str, command: &str) -> String {
    format!(
        "Gathering: {}\nCommand: {}\n{}\n",
        description,
        command,
        "=".repeat(RULE_WIDTH)
    )
}

fn append(path: &Path, text: &str) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    f.write_all(text.as_bytes())
}

/// Runs `command` and appends header plus output (or an `[ERROR]` block) to `out_path`.
///
/// Returns `Err` only when the output file itself cannot be written.
pub async fn run_and_append(
    command: &str,
    out_path: &Path,
    description: &str,
    timeout: Duration,
) -> io::Result<CommandStatus> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    append(out_path, &header(description, command))?;

    match shell::run_shell(command, timeout).await {
        Ok(out) if out.timed_out => {
            let mut block = format!(
                "\n[ERROR] Command timed out after {} seconds.\n",
                timeout.as_secs_f64()
            );
            block.push_str(&out.output);
            block.push_str("\n\n");
            append(out_path, &block)?;
            Ok(CommandStatus::TimedOut)
        }
        Ok(out) => {
            append(out_path, &format!("{}\n\n", out.output))?;
            Ok(match out.failure_reason(timeout) {
                None => CommandStatus::Ok,
                Some(reason) => CommandStatus::Failed(reason),
            })
        }
        Err(e) => {
            append(
                out_path,
                &format!("\n[ERROR] Unexpected error running command: {}\n\n", e),
            )?;
            Ok(CommandStatus::SpawnError(e.to_string()))
        }
    }
}

/// Hook called around each catalog command.
pub trait CollectObserver {
    fn command_started(&mut self, _entry: &CollectorCommand) {}
    fn command_finished(&mut self, _entry: &CollectorCommand, _status: &CommandStatus) {}
}

/// Runs every entry in order, appending into `output_dir/<entry.file>`.
/// Returns the status of each entry; an unwritable output file is recorded as a spawn error.
pub async fn collect(
    entries: &[CollectorCommand],
    output_dir: &Path,
    timeout: Duration,
    observer: &mut dyn CollectObserver,
) -> Vec<CommandStatus> {
    let mut statuses = Vec::with_capacity(entries.len());
    for entry in entries {
        observer.command_started(entry);
        let out_path = output_dir.join(entry.file);
        let status = match run_and_append(entry.command, &out_path, entry.description, timeout).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(file = entry.file, "could not write output: {}", e);
                CommandStatus::SpawnError(format!("write {}: {}", out_path.display(), e))
            }
        };
        match &status {
            CommandStatus::Ok => tracing::debug!(command = entry.command, "ok"),
            other => tracing::info!(command = entry.command, "finished with {:?}", other),
        }
        observer.command_finished(entry, &status);
        statuses.push(status);
    }
    statuses
}
