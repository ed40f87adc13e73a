//! `opskit wordlists` – mirror the security wordlists with branch/mirror fallback.

use anyhow::Result;
use opskit_core::config::OpskitConfig;
use opskit_core::driver::{ensure_output_dir, run_tasks};
use opskit_core::fallback::FetchOptions;
use opskit_core::size::human_readable_size;
use opskit_core::{catalog, checksum, summary};

use super::report::ConsoleObserver;

pub async fn run_wordlists(cfg: &OpskitConfig) -> Result<()> {
    let dir = cfg.wordlists.dir.as_path();
    println!("Security Wordlists Downloader (Git Raw URLs)");
    println!("=============================================");

    if ensure_output_dir(dir)? {
        println!("Created {} directory", dir.display());
    }

    let tasks = catalog::wordlist_tasks(dir)?;
    let opts = FetchOptions {
        download: (&cfg.http).into(),
        command_timeout: cfg.sysinfo.command_timeout(),
    };
    let mut observer = ConsoleObserver::default();
    run_tasks(&tasks, &opts, &mut observer).await;

    let shown = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    println!("\nDownload process completed!");
    println!("Files saved in: {}\n", shown.display());

    println!("Downloaded files:");
    let files = summary::list_txt_files(dir);
    if files.is_empty() {
        println!(" No .txt files found");
    }
    for f in &files {
        let path = dir.join(&f.name);
        let size = f.size.map(human_readable_size).unwrap_or_else(|| "?".to_string());
        match checksum::sha256_path(&path) {
            Ok(digest) => println!(" - {} ({}) sha256:{}", f.name, size, digest),
            Err(e) => {
                tracing::debug!("checksum {}: {:#}", path.display(), e);
                println!(" - {} ({})", f.name, size);
            }
        }
    }

    println!("\nNote: These wordlists are for legitimate security testing purposes only.");
    println!("Always ensure you have proper authorization before using them.");
    Ok(())
}
