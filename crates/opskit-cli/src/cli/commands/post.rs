//! `opskit post` – POST a JSON body and print the (best-effort decoded) response.

use anyhow::{bail, Context, Result};
use opskit_core::catalog;
use opskit_core::http;
use serde_json::Value;
use std::time::Duration;

/// Parse `Name: value` header arguments.
pub(crate) fn parse_header_args(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|raw| match raw.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => bail!("invalid header '{}': expected 'Name: value'", raw),
        })
        .collect()
}

pub async fn run_post(
    url: &str,
    header_args: &[String],
    data: Option<&str>,
    timeout: Duration,
) -> Result<()> {
    let headers = if header_args.is_empty() {
        catalog::default_post_headers()
    } else {
        parse_header_args(header_args)?
    };
    let payload: Value = match data {
        Some(raw) => serde_json::from_str(raw).context("--data is not valid JSON")?,
        None => catalog::default_post_payload(),
    };

    let res = tokio::task::spawn_blocking({
        let url = url.to_string();
        let headers = headers.clone();
        move || http::post_json(&url, &headers, &payload, timeout)
    })
    .await
    .context("POST task join")?;

    let resp = match res {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(url, "POST failed: {}", e);
            println!("Failure: {}", e);
            return Ok(());
        }
    };

    println!("POST to {} achieved! Status: {}", url, resp.status);
    println!("\nTried to post:");
    for (name, value) in &headers {
        println!("  {}: {}", name, value);
    }

    println!("\nResponse:");
    match resp.json() {
        Ok(v) => println!("{}", serde_json::to_string_pretty(&v)?),
        Err(e) => {
            tracing::debug!("response not JSON: {}", e);
            println!("Not JSON.");
        }
    }
    Ok(())
}
