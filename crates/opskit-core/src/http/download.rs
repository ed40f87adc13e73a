//! Single-stream GET into a part file.

use super::parse::HeaderLines;
use super::progress::{TransferProgress, PROGRESS_INTERVAL};
use crate::config::HttpConfig;
use crate::error::{check_status, FetchError};
use crate::storage::PartFile;
use std::cell::Cell;
use std::path::Path;
use std::time::{Duration, Instant};

/// Transfer bounds and identity for a download.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub connect_timeout: Duration,
    /// Abort when no bytes arrive for this long.
    pub stall_timeout: Duration,
    /// Optional bound on the whole transfer.
    pub max_duration: Option<Duration>,
    pub user_agent: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        DownloadOptions::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for DownloadOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            stall_timeout: cfg.stall_timeout(),
            max_duration: cfg.max_duration(),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl DownloadOptions {
    /// Bound reported when curl gives up with an operation timeout.
    fn timeout_bound(&self) -> Duration {
        self.max_duration.unwrap_or(self.stall_timeout)
    }
}

/// Downloads `url` to `final_path` via `<final_path>.part`, renaming only when the
/// body is complete. Returns the number of bytes written.
///
/// On any error the part file is removed and an existing `final_path` is left untouched.
pub fn download_to(url: &str, final_path: &Path, opts: &DownloadOptions) -> Result<u64, FetchError> {
    download_with_progress(url, final_path, opts, |_| {})
}

/// Like [`download_to`], calling `on_progress` while bytes arrive (at most once per
/// [`PROGRESS_INTERVAL`]) and once more with the final count on success.
pub fn download_with_progress<F>(
    url: &str,
    final_path: &Path,
    opts: &DownloadOptions,
    mut on_progress: F,
) -> Result<u64, FetchError>
where
    F: FnMut(TransferProgress),
{
    let started = Instant::now();
    let mut part = PartFile::create(final_path)?;
    let mut write_error: Option<std::io::Error> = None;
    let mut lines = HeaderLines::default();
    let total: Cell<Option<u64>> = Cell::new(None);
    let mut last_report: Option<Instant> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.useragent(&opts.user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(1)?;
    easy.low_speed_time(opts.stall_timeout)?;
    if let Some(max) = opts.max_duration {
        easy.timeout(max)?;
    }
    // Without this a 404 body would be streamed into the part file.
    easy.fail_on_error(true)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            lines.push_raw(data);
            total.set(lines.content_length());
            true
        })?;
        transfer.write_function(|data| match part.write(data) {
            Ok(()) => {
                if last_report.map_or(true, |t| t.elapsed() >= PROGRESS_INTERVAL) {
                    last_report = Some(Instant::now());
                    on_progress(TransferProgress {
                        downloaded: part.written(),
                        total: total.get(),
                    });
                }
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("download write failed: {}", e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(FetchError::Filesystem(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            return Err(FetchError::Rejected(easy.response_code().unwrap_or(0)));
        }
        if e.is_partial_file() {
            if let Some(expected) = total.get() {
                return Err(FetchError::Incomplete {
                    expected,
                    received: part.written(),
                });
            }
        }
        return Err(FetchError::from_curl(e, opts.timeout_bound()));
    }
    check_status(easy.response_code()?)?;

    let received = part.written();
    on_progress(TransferProgress {
        downloaded: received,
        total: total.get(),
    });

    let written = part.finish()?;
    tracing::info!(
        url,
        bytes = written,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "saved {}",
        final_path.display()
    );
    Ok(written)
}
