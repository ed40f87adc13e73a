//! Run drivers: own an ordered list of work, run it sequentially, report.
//!
//! Drivers never abort on a per-task or per-command failure; only missing
//! preconditions (e.g. the sysinfo base directory) are fatal.

mod sysinfo;
mod tasks;

pub use sysinfo::{run_sysinfo, SysinfoRun};
pub use tasks::{ensure_output_dir, run_tasks, TaskObserver, TaskReport};
