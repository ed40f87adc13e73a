//! End-of-run summary artifact: host facts plus the files a run produced.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shell;

/// Name of the summary file written into a sysinfo output directory.
pub const SUMMARY_FILE: &str = "00_SUMMARY.txt";

const FACT_TIMEOUT: Duration = Duration::from_secs(10);

/// Basic identity of the host and invoking user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFacts {
    pub hostname: String,
    pub os: String,
    pub kernel: String,
    pub architecture: String,
    pub user: String,
    pub user_id: String,
}

impl HostFacts {
    /// Collect facts via `hostname`, `/etc/os-release` (or `uname -s`), `uname -r/-m`, `whoami`, `id`.
    pub async fn gather() -> Self {
        let pretty = fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|s| pretty_name(&s));
        let os = match pretty {
            Some(name) => name,
            None => shell::capture_line("uname -s", FACT_TIMEOUT).await,
        };
        HostFacts {
            hostname: shell::capture_line("hostname", FACT_TIMEOUT).await,
            os,
            kernel: shell::capture_line("uname -r", FACT_TIMEOUT).await,
            architecture: shell::capture_line("uname -m", FACT_TIMEOUT).await,
            user: shell::capture_line("whoami", FACT_TIMEOUT).await,
            user_id: shell::capture_line("id", FACT_TIMEOUT).await,
        }
    }
}

/// `PRETTY_NAME` from os-release content, unquoted.
pub fn pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|v| v.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|v| !v.is_empty())
}

/// One file in an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: Option<u64>,
}

/// Regular files in `dir`, sorted by name. Part files and `exclude` are skipped.
pub fn list_files(dir: &Path, exclude: Option<&str>) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for ent in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let ent = ent?;
        let name = ent.file_name().to_string_lossy().into_owned();
        if Some(name.as_str()) == exclude || name.ends_with(crate::storage::TEMP_SUFFIX) {
            continue;
        }
        let meta = ent.metadata().ok();
        if meta.as_ref().map(|m| m.is_dir()).unwrap_or(false) {
            continue;
        }
        entries.push(FileEntry {
            name,
            size: meta.map(|m| m.len()),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// `.txt` files (case-insensitive) in `dir`, sorted; empty when the directory is missing.
pub fn list_txt_files(dir: &Path) -> Vec<FileEntry> {
    match list_files(dir, None) {
        Ok(files) => files
            .into_iter()
            .filter(|f| f.name.to_lowercase().ends_with(".txt"))
            .collect(),
        Err(e) => {
            tracing::debug!("{:#}", e);
            Vec::new()
        }
    }
}

/// Text of the summary artifact.
pub fn render_summary(facts: &HostFacts, generated: DateTime<Utc>, files: &[FileEntry]) -> String {
    let mut lines = vec![
        "=== SYSTEM INFORMATION SUMMARY ===".to_string(),
        format!("Generated: {} UTC", generated.format("%Y-%m-%dT%H:%M:%S%.6f")),
        format!("Hostname: {}", facts.hostname),
        format!("OS: {}", facts.os),
        format!("Kernel: {}", facts.kernel),
        format!("Architecture: {}", facts.architecture),
        format!("Current User: {}", facts.user),
        format!("User ID: {}", facts.user_id),
        String::new(),
        "=== FILES GENERATED ===".to_string(),
    ];
    for f in files {
        match f.size {
            Some(size) => lines.push(format!("{} - {} bytes", f.name, size)),
            None => lines.push(f.name.clone()),
        }
    }
    lines.join("\n")
}

/// Enumerate `output_dir` and write `00_SUMMARY.txt` into it. Returns the summary path.
pub fn write_summary(output_dir: &Path, facts: &HostFacts, generated: DateTime<Utc>) -> Result<PathBuf> {
    let text = match list_files(output_dir, Some(SUMMARY_FILE)) {
        Ok(files) => render_summary(facts, generated, &files),
        Err(e) => {
            tracing::warn!("{:#}", e);
            let mut text = render_summary(facts, generated, &[]);
            text.push_str(&format!("\n[ERROR enumerating files: {:#}]", e));
            text
        }
    };
    let path = output_dir.join(SUMMARY_FILE);
    fs::write(&path, text).with_context(|| format!("write summary {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pretty_name_parsing() {
        let s = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\nID=debian\n";
        assert_eq!(pretty_name(s).as_deref(), Some("Debian GNU/Linux 12 (bookworm)"));
        assert_eq!(pretty_name("ID=alpine\n"), None);
        assert_eq!(pretty_name("PRETTY_NAME=\"\"\n"), None);
    }

    #[test]
    fn render_layout() {
        let facts = HostFacts {
            hostname: "box".into(),
            os: "Debian".into(),
            kernel: "6.1.0".into(),
            architecture: "x86_64".into(),
            user: "root".into(),
            user_id: "uid=0(root)".into(),
        };
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let files = [
            FileEntry { name: "01_system_info.txt".into(), size: Some(120) },
            FileEntry { name: "02_hardware.txt".into(), size: Some(0) },
        ];
        let text = render_summary(&facts, t, &files);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== SYSTEM INFORMATION SUMMARY ===");
        assert_eq!(lines[1], "Generated: 2024-01-02T03:04:05.000000 UTC");
        assert_eq!(lines[2], "Hostname: box");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "=== FILES GENERATED ===");
        assert_eq!(lines[10], "01_system_info.txt - 120 bytes");
        assert_eq!(lines[11], "02_hardware.txt - 0 bytes");
    }

    #[test]
    fn list_files_skips_parts_dirs_and_excluded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"bb").unwrap();
        fs::write(dir.path().join("a.TXT"), b"a").unwrap();
        fs::write(dir.path().join("c.txt.part"), b"partial").unwrap();
        fs::write(dir.path().join(SUMMARY_FILE), b"old").unwrap();
        fs::write(dir.path().join("notes.md"), b"n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let all = list_files(dir.path(), Some(SUMMARY_FILE)).unwrap();
        let names: Vec<_> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.TXT", "b.txt", "notes.md"]);

        let txt = list_txt_files(dir.path());
        let names: Vec<_> = txt.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
        assert_eq!(txt[1].size, Some(2));
    }

    #[test]
    fn list_txt_files_missing_dir_is_empty() {
        assert!(list_txt_files(Path::new("/nonexistent/opskit")).is_empty());
    }
}
