//! Byte-level progress of a single transfer.

use std::time::Duration;

/// Minimum spacing between progress reports from one transfer.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(200);

/// Snapshot of one download in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Bytes written to the part file so far.
    pub downloaded: u64,
    /// `Content-Length` of the final response, when the server sent one.
    pub total: Option<u64>,
}

impl TransferProgress {
    /// Percent complete in [0, 100]; `None` without a known total.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(100.0),
            Some(total) => Some((self.downloaded as f64 / total as f64 * 100.0).min(100.0)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_with_total() {
        let p = TransferProgress { downloaded: 512, total: Some(2048) };
        assert_eq!(p.percent(), Some(25.0));
        let done = TransferProgress { downloaded: 0, total: Some(0) };
        assert_eq!(done.percent(), Some(100.0));
    }

    #[test]
    fn percent_unknown_without_total() {
        let p = TransferProgress { downloaded: 10, total: None };
        assert_eq!(p.percent(), None);
    }
}
