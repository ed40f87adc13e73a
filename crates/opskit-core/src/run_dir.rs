//! Per-run output directory: `<base>/sysinfo_<YYYYMMDD_HHMMSS>_<NNNN>`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const RUN_DIR_PREFIX: &str = "sysinfo";

/// Directory name for a run started at `now` with disambiguator `suffix` (1000..=9999).
pub fn run_dir_name(now: DateTime<Utc>, suffix: u16) -> String {
    format!("{}_{}_{}", RUN_DIR_PREFIX, now.format("%Y%m%d_%H%M%S"), suffix)
}

/// Random 4-digit disambiguator in 1000..=9999.
pub fn random_suffix() -> u16 {
    let n = uuid::Uuid::new_v4().as_u128();
    1000 + (n % 9000) as u16
}

/// Path of a fresh run directory under `base`, computed once at the start of a run.
pub fn new_run_dir_path(base: &Path) -> PathBuf {
    base.join(run_dir_name(Utc::now(), random_suffix()))
}

/// Fails when the base directory is missing; a run must not start without it.
pub fn ensure_base_dir(base: &Path) -> Result<()> {
    if !base.is_dir() {
        bail!("{} directory not found", base.display());
    }
    Ok(())
}

/// Create the run directory (and parents).
pub fn create_run_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("create output directory {}", path.display()))
}
