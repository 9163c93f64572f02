//! HTTP transport for downloading the source document.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Issues a GET for `url` through `client` and returns the response body.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the request fails, or the server
/// answers with a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Fetched document");

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_bytes_rejects_invalid_url() {
        let client = BasicClient::new();
        let result = fetch_bytes(&client, "not a url").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid URL"));
    }
}
