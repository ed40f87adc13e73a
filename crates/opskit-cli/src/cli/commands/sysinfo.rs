//! `opskit sysinfo` – run the command catalog into a fresh output directory.

use anyhow::Result;
use opskit_core::catalog::{self, CollectorCommand};
use opskit_core::collector::{CollectObserver, CommandStatus};
use opskit_core::config::OpskitConfig;
use opskit_core::{driver, run_dir};

struct GatherPrinter;

impl CollectObserver for GatherPrinter {
    fn command_started(&mut self, entry: &CollectorCommand) {
        println!("Gathering: {}", entry.description);
    }

    fn command_finished(&mut self, entry: &CollectorCommand, status: &CommandStatus) {
        if let CommandStatus::TimedOut = status {
            println!("  timed out: {}", entry.command);
        }
    }
}

pub async fn run_sysinfo(cfg: &OpskitConfig) -> Result<()> {
    let base = cfg.sysinfo.base_dir.as_path();
    if run_dir::ensure_base_dir(base).is_err() {
        println!("Error: {} directory not found. Exiting.", base.display());
        std::process::exit(1);
    }
    let output_dir = run_dir::new_run_dir_path(base);

    println!("=== Linux System Information Gathering ===");
    println!("Output directory: {}", output_dir.display());
    println!("Started: {}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"));
    println!();

    let run = driver::run_sysinfo(
        base,
        &output_dir,
        catalog::SYSINFO_COMMANDS,
        cfg.sysinfo.command_timeout(),
        &mut GatherPrinter,
    )
    .await?;

    let failed = run
        .statuses
        .iter()
        .filter(|s| **s != CommandStatus::Ok)
        .count();
    tracing::info!(failed, total = run.statuses.len(), "sysinfo sweep finished");

    println!();
    println!("=== Information Gathering Complete ===");
    println!("Results saved to: {}", run.output_dir.display());
    match &run.summary_path {
        Some(p) => println!("Summary available in: {}", p.display()),
        None => println!("Failed to write summary (see log)."),
    }
    println!();
    println!("Note: Some commands may fail due to permissions or missing tools.");
    println!("Review all output files for useful information.");
    Ok(())
}
