//! Fetch the response headers of a URL.

use super::parse::HeaderLines;
use crate::error::{check_status, FetchError};
use std::time::Duration;

/// Status and headers of the final response.
#[derive(Debug, Clone)]
pub struct HeaderResponse {
    pub status: u32,
    pub headers: Vec<(String, String)>,
}

/// Performs a GET, discards the body, and returns the headers of the final response.
///
/// Follows redirects. `timeout` bounds the whole request; non-2xx is `Rejected`.
pub fn fetch_headers(url: &str, timeout: Duration) -> Result<HeaderResponse, FetchError> {
    let mut lines = HeaderLines::default();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            lines.push_raw(data);
            true
        })?;
        transfer.write_function(|data| Ok(data.len()))?;
        transfer
            .perform()
            .map_err(|e| FetchError::from_curl(e, timeout))?;
    }

    let status = check_status(easy.response_code()?)?;
    tracing::debug!(url, status, "fetched headers");
    Ok(HeaderResponse {
        status,
        headers: lines.pairs(),
    })
}
