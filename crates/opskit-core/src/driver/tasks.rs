//! Sequential task driver on top of the fallback fetcher (wordlists, ad-hoc fetch).

use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::fallback::{fetch_with_fallback_observed, AttemptObserver, FetchOptions, NoopObserver};
use crate::source::{AttemptResult, Task};

/// Outcome of one task.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: Task,
    pub succeeded: bool,
    pub attempts: Vec<AttemptResult>,
    pub elapsed: Duration,
}

impl TaskReport {
    /// Bytes in the final file, when a source succeeded.
    pub fn bytes_written(&self) -> Option<u64> {
        self.attempts
            .iter()
            .find(|a| a.succeeded)
            .map(|a| a.bytes_written)
    }

    pub fn failed_attempts(&self) -> usize {
        self.attempts.iter().filter(|a| !a.succeeded).count()
    }
}

/// Adds a per-task hook to [`AttemptObserver`], called as soon as each task is done.
pub trait TaskObserver: AttemptObserver {
    fn task_finished(&mut self, _report: &TaskReport) {}
}

impl TaskObserver for NoopObserver {}

/// Create `dir` if needed. Returns true when it had to be created.
pub fn ensure_output_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    Ok(true)
}

/// Runs every task in order through the fallback fetcher. Exhausting a task's
/// sources is recorded in its report and the next task still runs.
pub async fn run_tasks<O: TaskObserver>(
    tasks: &[Task],
    opts: &FetchOptions,
    observer: &mut O,
) -> Vec<TaskReport> {
    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        let started = Instant::now();
        let mut attempts = Vec::new();
        let succeeded = fetch_with_fallback_observed(task, opts, &mut *observer, &mut attempts).await;
        let report = TaskReport {
            task: task.clone(),
            succeeded,
            attempts,
            elapsed: started.elapsed(),
        };
        observer.task_finished(&report);
        reports.push(report);
    }
    let ok = reports.iter().filter(|r| r.succeeded).count();
    tracing::info!("{} of {} task(s) succeeded", ok, reports.len());
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceSpec;

    #[test]
    fn ensure_output_dir_reports_creation() {
        let dir = tempfile::tempdir().unwrap();
        let wl = dir.path().join("wordlists");
        assert!(ensure_output_dir(&wl).unwrap());
        assert!(!ensure_output_dir(&wl).unwrap());
    }

    #[tokio::test]
    async fn failed_task_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = |s: &str| SourceSpec::Command(s.to_string());
        let tasks = vec![
            Task::new("bad", vec![cmd("exit 1")], dir.path().join("bad.txt")).unwrap(),
            Task::new("good", vec![cmd("exit 1"), cmd("echo ok")], dir.path().join("good.txt")).unwrap(),
        ];
        let reports = run_tasks(&tasks, &FetchOptions::default(), &mut NoopObserver).await;
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].succeeded);
        assert_eq!(reports[0].bytes_written(), None);
        assert!(reports[1].succeeded);
        assert_eq!(reports[1].bytes_written(), Some(3));
        assert_eq!(reports[1].failed_attempts(), 1);
        assert!(!dir.path().join("bad.txt").exists());
    }

    #[derive(Default)]
    struct Events(Vec<String>);

    impl AttemptObserver for Events {
        fn attempt_started(&mut self, task: &Task, _source: &SourceSpec) {
            self.0.push(format!("start {}", task.target_name()));
        }
    }

    impl TaskObserver for Events {
        fn task_finished(&mut self, report: &TaskReport) {
            self.0.push(format!("done {} {}", report.task.target_name(), report.succeeded));
        }
    }

    #[tokio::test]
    async fn each_task_is_reported_before_the_next_starts() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = |s: &str| SourceSpec::Command(s.to_string());
        let tasks = vec![
            Task::new("first", vec![cmd("echo 1")], dir.path().join("1.txt")).unwrap(),
            Task::new("second", vec![cmd("exit 1"), cmd("echo 2")], dir.path().join("2.txt")).unwrap(),
        ];
        let mut events = Events::default();
        run_tasks(&tasks, &FetchOptions::default(), &mut events).await;
        assert_eq!(
            events.0,
            vec![
                "start first",
                "done first true",
                "start second",
                "start second",
                "done second true",
            ]
        );
    }
}
