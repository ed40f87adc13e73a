//! `opskit headers` – print the response headers of a URL.

use anyhow::{Context, Result};
use opskit_core::http;
use std::time::Duration;

pub async fn run_headers(url: &str, timeout: Duration) -> Result<()> {
    let target = url.to_string();
    let res = tokio::task::spawn_blocking(move || http::fetch_headers(&target, timeout))
        .await
        .context("header fetch task join")?;

    match res {
        Ok(resp) => {
            println!("Headers for {}:", url);
            for (name, value) in &resp.headers {
                println!("  {}: {}", name, value);
            }
        }
        Err(e) => {
            tracing::warn!(url, "header fetch failed: {}", e);
            println!("An error occurred: {}", e);
        }
    }
    Ok(())
}
