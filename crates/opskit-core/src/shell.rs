//! Run a shell command string with a wall-clock timeout.
//!
//! Commands go through `sh -c` untouched so pipes, redirections, globs and
//! `-exec ... \;` keep working. Stderr is merged into stdout by the shell, so
//! the captured text interleaves both streams in order. Each command runs in
//! its own process group; on timeout, or when the future is dropped before the
//! command exits, the whole group is killed, which also stops the children of
//! a pipeline.

use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// How long to keep draining the pipe after the process exits or is killed.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Outcome of a command that could be started.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status, or `None` when the command was killed on timeout.
    pub status: Option<ExitStatus>,
    /// Combined stdout and stderr, lossily decoded.
    pub output: String,
    pub timed_out: bool,
}

impl CommandOutput {
    /// True when the command exited with status 0 within the timeout.
    pub fn success(&self) -> bool {
        !self.timed_out && self.status.map(|s| s.success()).unwrap_or(false)
    }

    /// Short description of a failed run (`exit status 1`, `killed by signal 9`, ...).
    pub fn failure_reason(&self, timeout: Duration) -> Option<String> {
        if self.timed_out {
            return Some(format!("timed out after {} seconds", timeout.as_secs_f64()));
        }
        let status = self.status?;
        if status.success() {
            return None;
        }
        if let Some(code) = status.code() {
            return Some(format!("exit status {}", code));
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(sig) = status.signal() {
                return Some(format!("killed by signal {}", sig));
            }
        }
        Some("terminated abnormally".to_string())
    }
}

/// Runs `command` through `sh -c`, capturing combined output, bounded by `timeout`.
///
/// Returns `Err` only when the shell itself cannot be spawned; a non-zero exit
/// or a timeout is reported in the `CommandOutput`.
pub async fn run_shell(command: &str, timeout: Duration) -> std::io::Result<CommandOutput> {
    // The newline keeps a trailing `\;` or comment from swallowing the brace.
    let script = format!("{{ {}\n}} 2>&1", command);
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn()?;
    let mut group = GroupGuard(child.id());

    let buf = Arc::new(Mutex::new(Vec::<u8>::new()));
    let reader = child.stdout.take().map(|mut stdout| {
        let buf = Arc::clone(&buf);
        tokio::spawn(async move {
            let mut chunk = [0u8; 8192];
            loop {
                match stdout.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if let Ok(mut b) = buf.lock() {
                            b.extend_from_slice(&chunk[..n]);
                        }
                    }
                }
            }
        })
    });

    let (status, timed_out) = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => {
            // Reaped: the pid may be reused from here on.
            group.disarm();
            (Some(status?), false)
        }
        Err(_) => {
            tracing::warn!(command, "timed out after {:?}, killing", timeout);
            group.kill();
            let _ = child.kill().await;
            (None, true)
        }
    };

    if let Some(mut handle) = reader {
        // Background children may still hold the pipe open; cap the drain.
        if tokio::time::timeout(DRAIN_GRACE, &mut handle).await.is_err() {
            tracing::debug!(command, "output pipe still open after exit, truncating");
            handle.abort();
        }
    }

    let output = buf
        .lock()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();
    Ok(CommandOutput {
        status,
        output,
        timed_out,
    })
}

/// Process group of a running command. Dropping an armed guard (the run was
/// cancelled, e.g. on interrupt) kills the whole group.
struct GroupGuard(Option<u32>);

impl GroupGuard {
    fn kill(&mut self) {
        if let Some(pid) = self.0.take() {
            kill_group(pid);
        }
    }

    fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn kill_group(pid: u32) {
    // Negative pid targets the process group created by `process_group(0)`.
    let r = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
    if r != 0 {
        tracing::debug!(pid, "kill process group failed");
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}

/// Runs `command` and returns its trimmed output, or an empty string when it fails to start.
/// Used for one-line host facts (`hostname`, `uname -r`, ...).
pub async fn capture_line(command: &str, timeout: Duration) -> String {
    match run_shell(command, timeout).await {
        Ok(out) => out.output.trim().to_string(),
        Err(e) => {
            tracing::debug!(command, "could not run: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn runs_echo_command() {
        let out = run_shell("echo hello", T).await.unwrap();
        assert!(out.success());
        assert_eq!(out.output.trim(), "hello");
    }

    #[tokio::test]
    async fn captures_exit_code() {
        let out = run_shell("exit 42", T).await.unwrap();
        assert!(!out.success());
        assert_eq!(out.status.and_then(|s| s.code()), Some(42));
        assert_eq!(out.failure_reason(T).as_deref(), Some("exit status 42"));
    }

    #[tokio::test]
    async fn merges_stderr_in_order() {
        let out = run_shell("echo one; echo two 1>&2; echo three", T)
            .await
            .unwrap();
        assert_eq!(out.output, "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn preserves_shell_features() {
        let out = run_shell("printf 'a\\nb\\nc\\n' | head -2", T).await.unwrap();
        assert_eq!(out.output, "a\nb\n");
        let out = run_shell("find / -maxdepth 0 -exec echo {} \\;", T)
            .await
            .unwrap();
        assert_eq!(out.output.trim(), "/");
    }

    #[tokio::test]
    async fn missing_executable_is_not_an_error() {
        let out = run_shell("definitely-not-a-real-binary-xyz", T)
            .await
            .unwrap();
        assert!(!out.success());
        assert_eq!(out.status.and_then(|s| s.code()), Some(127));
        assert!(!out.output.is_empty());
    }

    #[tokio::test]
    async fn timeout_kills_and_keeps_partial_output() {
        let started = std::time::Instant::now();
        let out = run_shell("echo early; sleep 30", Duration::from_millis(500))
            .await
            .unwrap();
        assert!(out.timed_out);
        assert!(!out.success());
        assert!(out.status.is_none());
        assert_eq!(out.output.trim(), "early");
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn capture_line_trims() {
        assert_eq!(capture_line("echo '  spaced  '", T).await, "spaced");
    }

    #[tokio::test]
    async fn background_child_holding_pipe_does_not_block() {
        let started = std::time::Instant::now();
        let out = run_shell("sleep 4 & echo done", T).await.unwrap();
        assert!(out.success());
        assert_eq!(out.output.trim(), "done");
        assert!(started.elapsed() < Duration::from_millis(3500));
    }

    #[cfg(target_os = "linux")]
    fn alive(pid: u32) -> bool {
        // A zombie has already been killed; only its reaping is pending.
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit_once(')')
                .map(|(_, rest)| !rest.trim_start().starts_with(|c: char| c == 'Z' || c == 'X'))
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn cancelled_run_kills_the_process_group() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let command = format!("sleep 30 & echo $! > {}; wait", pid_file.display());

        let res = tokio::time::timeout(Duration::from_millis(500), run_shell(&command, T)).await;
        assert!(res.is_err(), "command should still be running when cancelled");

        let pid: u32 = std::fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while alive(pid) && std::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(!alive(pid), "sleep {} survived cancellation", pid);
    }
}
