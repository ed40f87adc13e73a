//! CLI command handlers, one file per command.

mod completions;
mod fetch;
mod headers;
mod post;
mod report;
mod sysinfo;
mod wordlists;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use headers::run_headers;
pub use post::run_post;
pub use sysinfo::run_sysinfo;
pub use wordlists::run_wordlists;
