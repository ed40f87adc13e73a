//! Console reporting shared by the download commands.

use opskit_core::driver::{TaskObserver, TaskReport};
use opskit_core::fallback::AttemptObserver;
use opskit_core::http::TransferProgress;
use opskit_core::size::human_readable_size;
use opskit_core::source::{AttemptResult, SourceSpec, Task};
use std::io::Write;

/// Prints a task header on the first attempt of each task, a live progress line
/// while bytes arrive, one line per attempt and the task outcome.
#[derive(Default)]
pub struct ConsoleObserver {
    current: Option<String>,
    progress_shown: bool,
}

impl ConsoleObserver {
    fn end_progress_line(&mut self) {
        if self.progress_shown {
            println!();
            self.progress_shown = false;
        }
    }
}

fn file_label(task: &Task) -> String {
    task.output_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| task.target_name().to_string())
}

/// One-line progress text: done and total with percent, or bytes only without a total.
pub(crate) fn progress_line(name: &str, progress: &TransferProgress) -> String {
    let done = human_readable_size(progress.downloaded);
    match (progress.total, progress.percent()) {
        (Some(total), Some(pct)) => format!(
            "Downloading {} — {} / {} ({:5.1}%)",
            name,
            done,
            human_readable_size(total),
            pct
        ),
        _ => format!("Downloading {} — {}", name, done),
    }
}

impl AttemptObserver for ConsoleObserver {
    fn attempt_started(&mut self, task: &Task, source: &SourceSpec) {
        if self.current.as_deref() != Some(task.target_name()) {
            println!("\nDownloading {}...", task.target_name());
            self.current = Some(task.target_name().to_string());
        }
        match source {
            SourceSpec::Http(url) => println!("Trying: {}", url),
            SourceSpec::Command(cmd) => println!("Running: {}", cmd),
        }
    }

    fn attempt_progress(&mut self, task: &Task, progress: &TransferProgress) {
        // Trailing spaces clear leftovers of a longer previous line.
        print!("\r{}    ", progress_line(&file_label(task), progress));
        let _ = std::io::stdout().flush();
        self.progress_shown = true;
    }

    fn attempt_finished(&mut self, _task: &Task, result: &AttemptResult) {
        self.end_progress_line();
        match &result.error {
            None => println!(
                "  Saved {} ({} bytes)",
                human_readable_size(result.bytes_written),
                result.bytes_written
            ),
            Some(err) => println!("  ✗ Failed from this source: {}", err),
        }
    }
}

impl TaskObserver for ConsoleObserver {
    fn task_finished(&mut self, report: &TaskReport) {
        self.end_progress_line();
        print_task_outcome(report);
    }
}

/// Final line for a task: success with size and rate, or exhaustion.
fn print_task_outcome(report: &TaskReport) {
    let name = file_label(&report.task);
    match report.bytes_written() {
        Some(bytes) => {
            let secs = report.elapsed.as_secs_f64();
            let rate = if secs > 0.0 { (bytes as f64 / secs) as u64 } else { bytes };
            println!("✓ Successfully downloaded {}", name);
            println!(
                "  File size: {} in {:.1}s ({}/s)",
                human_readable_size(bytes),
                secs,
                human_readable_size(rate)
            );
        }
        None => println!(
            "✗ Could not download {} from any of {} source(s)",
            name,
            report.task.sources().len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line_with_total() {
        let p = TransferProgress { downloaded: 1536, total: Some(4096) };
        assert_eq!(
            progress_line("rockyou.txt", &p),
            "Downloading rockyou.txt — 1.50 KB / 4.00 KB ( 37.5%)"
        );
    }

    #[test]
    fn progress_line_without_total() {
        let p = TransferProgress { downloaded: 512, total: None };
        assert_eq!(progress_line("list.txt", &p), "Downloading list.txt — 512 B");
    }
}
