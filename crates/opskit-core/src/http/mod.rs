//! HTTP operations over libcurl: header fetch, streaming download, JSON POST.
//!
//! All functions block the current thread; call them from `spawn_blocking`
//! when used from async code.

mod download;
mod headers;
mod parse;
mod post;
mod progress;

pub use download::{download_to, download_with_progress, DownloadOptions};
pub use headers::{fetch_headers, HeaderResponse};
pub use parse::{parse_header_lines, HeaderLines};
pub use post::{post_json, PostResponse};
pub use progress::{TransferProgress, PROGRESS_INTERVAL};

/// Build a curl header list from `(name, value)` pairs (e.g. `"Name: value"`).
pub(crate) fn header_list<'a, I>(headers: I) -> Result<Option<curl::easy::List>, curl::Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut list = curl::easy::List::new();
    let mut any = false;
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        any = true;
    }
    Ok(any.then_some(list))
}
