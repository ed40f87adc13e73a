use opskit_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unwritable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Only an operator interrupt aborts a run mid-way. The command future is
    // dropped when select! returns, which kills a running shell command's group
    // before the process exits.
    let outcome = tokio::select! {
        res = CliCommand::run_from_args() => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => {}
        Some(Err(err)) => {
            eprintln!("opskit error: {:#}", err);
            std::process::exit(1);
        }
        None => {
            println!("\nInterrupted by user.");
            tracing::warn!("interrupted by user");
            std::process::exit(1);
        }
    }
}
