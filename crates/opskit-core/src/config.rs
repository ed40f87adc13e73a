use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Transfer limits for downloads (`[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed to establish the connection.
    pub connect_timeout_secs: u64,
    /// Seconds the transfer may stall (no bytes received) before it is aborted.
    pub stall_timeout_secs: u64,
    /// Optional upper bound on a whole transfer, in seconds (None = no bound).
    pub max_duration_secs: Option<u64>,
    /// User-Agent sent with downloads.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            stall_timeout_secs: 30,
            max_duration_secs: None,
            user_agent: "opskit-wordlist-downloader/1.0".to_string(),
        }
    }
}

/// Timeout for the header fetcher and the POST demo (`[probe]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Wordlist downloader settings (`[wordlists]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordlistConfig {
    /// Directory the wordlists are saved to (relative paths resolve against the cwd).
    pub dir: PathBuf,
}

impl Default for WordlistConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("wordlists"),
        }
    }
}

/// System-information collector settings (`[sysinfo]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SysinfoConfig {
    /// Existing directory under which the per-run output directory is created.
    pub base_dir: PathBuf,
    /// Wall-clock limit per command; the command's process group is killed on expiry.
    pub command_timeout_secs: u64,
}

impl Default for SysinfoConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("/tmp"),
            command_timeout_secs: 60,
        }
    }
}

/// Global configuration, optionally loaded from `~/.config/opskit/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpskitConfig {
    pub http: HttpConfig,
    pub probe: ProbeConfig,
    pub wordlists: WordlistConfig,
    pub sysinfo: SysinfoConfig,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn stall_timeout(&self) -> Duration {
        Duration::from_secs(self.stall_timeout_secs)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_secs.map(Duration::from_secs)
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SysinfoConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("opskit")?;
    Ok(xdg_dirs.get_config_home().join("config.toml"))
}

/// Load configuration from the XDG config path; built-in defaults when no file exists.
///
/// Nothing is written to disk: the tools run without any persisted configuration.
pub fn load_or_default() -> Result<OpskitConfig> {
    let path = config_path()?;
    load_from_path(&path)
}

/// Load configuration from `path`, or defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<OpskitConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(OpskitConfig::default());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: OpskitConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
