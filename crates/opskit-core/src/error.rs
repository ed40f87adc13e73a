//! Error taxonomy for a single source attempt.
//!
//! Every variant is non-fatal to a run: drivers render it with `Display` and
//! move on to the next source, command, or task.

use std::time::Duration;

/// Failure of one fetch, POST, or command attempt.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-layer failure reported by curl (DNS, connect, reset, ...).
    #[error("{0}")]
    Transport(#[source] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Rejected(u32),
    /// Transfer ended before the advertised `Content-Length` was received.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    Incomplete { expected: u64, received: u64 },
    /// Transfer or command exceeded its bound.
    #[error("timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),
    /// Command exited non-zero, was killed by a signal, or could not be spawned.
    #[error("{0}")]
    Process(String),
    /// Writing the part file or renaming it into place failed.
    #[error("filesystem: {0}")]
    Filesystem(#[from] std::io::Error),
    /// Response body is not JSON.
    #[error("response is not JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Classify a curl error: operation timeouts map to `Timeout`, everything else is transport.
    pub fn from_curl(e: curl::Error, bound: Duration) -> Self {
        if e.is_operation_timedout() {
            FetchError::Timeout(bound)
        } else {
            FetchError::Transport(e)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Transport(e)
    }
}

/// Check a response code; anything outside 2xx is `Rejected`.
pub fn check_status(code: u32) -> Result<u32, FetchError> {
    if (200..300).contains(&code) {
        Ok(code)
    } else {
        Err(FetchError::Rejected(code))
    }
}
