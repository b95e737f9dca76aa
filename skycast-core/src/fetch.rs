//! Payload transport.
//!
//! The normalization core is I/O free: callers build a URL via
//! [`crate::provider::WeatherProvider::request_url`], fetch the raw payload
//! text here, and hand it to the provider accessors.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;

/// Fetch a raw provider payload, returning the body text on success.
pub async fn fetch_payload(http: &Client, url: &str) -> Result<String> {
    let res = http.get(url).send().await.context("Failed to send provider request")?;

    let status = res.status();
    let body = res.text().await.context("Failed to read provider response body")?;

    if !status.is_success() {
        return Err(anyhow!(
            "Provider request failed with status {}: {}",
            status,
            truncate_body(&body),
        ));
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
