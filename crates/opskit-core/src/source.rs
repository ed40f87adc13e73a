//! Tasks and their candidate sources.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix that marks a shell command when sources are given as strings.
pub const COMMAND_PREFIX: &str = "cmd:";

/// One candidate origin for a task's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Fetch the body of an HTTP(S) URL.
    Http(String),
    /// Run a shell command string; its combined output is the payload.
    Command(String),
}

impl SourceSpec {
    /// Raw GitHub URL for `path` in `repo` (`owner/name`) at `branch`.
    pub fn github_raw(repo: &str, branch: &str, path: &str) -> Self {
        SourceSpec::Http(github_raw_url(repo, branch, path))
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Http(url) => write!(f, "{}", url),
            SourceSpec::Command(cmd) => write!(f, "{}{}", COMMAND_PREFIX, cmd),
        }
    }
}

impl FromStr for SourceSpec {
    type Err = anyhow::Error;

    /// `http://` / `https://` URLs become `Http`, `cmd:<shell>` becomes `Command`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(cmd) = s.strip_prefix(COMMAND_PREFIX) {
            let cmd = cmd.trim();
            if cmd.is_empty() {
                bail!("empty command source");
            }
            return Ok(SourceSpec::Command(cmd.to_string()));
        }
        let parsed = url::Url::parse(s).with_context(|| format!("invalid source URL: {}", s))?;
        match parsed.scheme() {
            "http" | "https" => Ok(SourceSpec::Http(s.to_string())),
            other => bail!("unsupported source scheme '{}' (use http(s):// or {}...)", other, COMMAND_PREFIX),
        }
    }
}

/// `https://raw.githubusercontent.com/<repo>/<branch>/<path>`.
pub fn github_raw_url(repo: &str, branch: &str, path: &str) -> String {
    format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        repo.trim_matches('/'),
        branch,
        path.trim_start_matches('/')
    )
}

/// One logical unit of work mapping to one output file.
#[derive(Debug, Clone)]
pub struct Task {
    target_name: String,
    sources: Vec<SourceSpec>,
    output_path: PathBuf,
}

impl Task {
    /// Build a task. Fails when `sources` is empty.
    pub fn new(
        target_name: impl Into<String>,
        sources: Vec<SourceSpec>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let target_name = target_name.into();
        if sources.is_empty() {
            bail!("task '{}' has no sources", target_name);
        }
        Ok(Task {
            target_name,
            sources,
            output_path: output_path.into(),
        })
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Record of one source attempt; kept for logging and console output only.
#[derive(Debug, Clone)]
pub struct AttemptResult {
    pub source: SourceSpec,
    pub succeeded: bool,
    pub bytes_written: u64,
    pub error: Option<String>,
}

impl AttemptResult {
    pub fn success(source: &SourceSpec, bytes_written: u64) -> Self {
        Self {
            source: source.clone(),
            succeeded: true,
            bytes_written,
            error: None,
        }
    }

    pub fn failure(source: &SourceSpec, error: impl fmt::Display) -> Self {
        Self {
            source: source.clone(),
            succeeded: false,
            bytes_written: 0,
            error: Some(error.to_string()),
        }
    }
}
