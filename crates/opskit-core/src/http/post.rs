//! POST a JSON body with custom headers.

use super::header_list;
use crate::error::{check_status, FetchError};
use serde_json::Value;
use std::time::Duration;

/// Status and raw body of a POST response.
#[derive(Debug, Clone)]
pub struct PostResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl PostResponse {
    /// Best-effort structured decode of the body.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }
}

/// Sends `payload` as `application/json` to `url` with `headers`, bounded by `timeout`.
///
/// Non-2xx responses are `Rejected`; the body is returned undecoded.
pub fn post_json(
    url: &str,
    headers: &[(String, String)],
    payload: &Value,
    timeout: Duration,
) -> Result<PostResponse, FetchError> {
    let body = serde_json::to_vec(payload)?;
    let mut response = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(&body)?;
    easy.follow_location(true)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    let has_content_type = headers
        .iter()
        .any(|(k, _)| k.trim().eq_ignore_ascii_case("content-type"));
    let content_type = ("Content-Type", "application/json");
    let all = headers
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .chain((!has_content_type).then_some(content_type));
    if let Some(list) = header_list(all)? {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            response.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .map_err(|e| FetchError::from_curl(e, timeout))?;
    }

    let status = check_status(easy.response_code()?)?;
    tracing::debug!(url, status, bytes = response.len(), "POST completed");
    Ok(PostResponse {
        status,
        body: response,
    })
}
