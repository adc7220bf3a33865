//! Bounded, redirect-following page fetch.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;
use url::Url;

use linkstash_core::{defaults, Error, Result};

/// Maximum number of redirects followed before giving up.
const MAX_REDIRECTS: usize = 5;

/// Bytes of body retained for parsing. Metadata lives in `<head>`, which
/// fits comfortably; truncating mid-document still parses.
const MAX_BODY_BYTES: usize = 512 * 1024;

/// HTTP client for preview page fetches.
///
/// Every request carries the identifying User-Agent and the fixed preview
/// timeout; the declared content-type of the response is ignored.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::PREVIEW_TIMEOUT_SECS))
            .user_agent(defaults::PREVIEW_USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Fetch `url` and return the response body as text.
    ///
    /// Any transport failure, timeout, or non-2xx status is an error
    /// carrying the URL and cause; there is no retry.
    pub async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::preview(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::preview(
                url.as_str(),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Error")
                ),
            ));
        }

        let mut body = response
            .text()
            .await
            .map_err(|e| Error::preview(url.as_str(), e.to_string()))?;

        if body.len() > MAX_BODY_BYTES {
            let mut end = MAX_BODY_BYTES;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
            debug!(
                subsystem = "preview",
                component = "fetch",
                url = %url,
                "Truncated oversized response body"
            );
        }

        Ok(body)
    }
}
