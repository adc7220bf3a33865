//! Preview assembly service.
//!
//! Orchestrates fetch and extraction into a normalized [`LinkPreview`].
//! All-or-nothing: every failure mode surfaces as one `Error::Preview`
//! carrying the offending URL; a successful result always has a title and
//! description, substituting sentinels when the page offers none.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use linkstash_core::{defaults, Error, LinkPreview, PreviewFetcher, Result};

use crate::extract::{extract_metadata, PageMetadata};
use crate::fetch::PageFetcher;

/// Preview service backed by live HTTP fetches.
#[derive(Debug, Clone)]
pub struct HttpPreviewService {
    fetcher: PageFetcher,
}

impl HttpPreviewService {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new()?,
        })
    }
}

#[async_trait]
impl PreviewFetcher for HttpPreviewService {
    async fn fetch_preview(&self, url: &str) -> Result<LinkPreview> {
        let start = Instant::now();
        let (normalized, parsed) = normalize_url(url)?;

        let html = self.fetcher.fetch_html(&parsed).await?;
        let metadata = extract_metadata(&html);
        debug!(
            subsystem = "preview",
            component = "service",
            url = %parsed,
            has_title = metadata.title.is_some(),
            has_description = metadata.description.is_some(),
            has_image = metadata.image.is_some(),
            "Extracted page metadata"
        );

        let preview = assemble(normalized, &parsed, metadata);
        info!(
            subsystem = "preview",
            component = "service",
            op = "fetch_preview",
            url = %preview.url,
            site = %preview.site,
            duration_ms = start.elapsed().as_millis() as u64,
            "Built link preview"
        );
        Ok(preview)
    }
}

/// Parse the input URL, prefixing `https://` when no scheme was given.
///
/// Returns the string to echo back to the caller (the input, plus the
/// prefix if one was added) alongside the parsed URL. Only `http` and
/// `https` are fetchable.
fn normalize_url(input: &str) -> Result<(String, Url)> {
    match Url::parse(input) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok((input.to_string(), url))
        }
        Ok(url) => Err(Error::preview(
            input,
            format!("unsupported URL scheme: {}", url.scheme()),
        )),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let prefixed = format!("https://{}", input);
            let url = Url::parse(&prefixed)
                .map_err(|e| Error::preview(input, format!("invalid URL: {}", e)))?;
            Ok((prefixed, url))
        }
        Err(e) => Err(Error::preview(input, format!("invalid URL: {}", e))),
    }
}

/// Hostname with a single leading `www.` prefix stripped.
fn site_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Truncate to at most `max` characters, never erroring on overflow.
fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Combine extracted metadata into the final preview.
fn assemble(url: String, parsed: &Url, metadata: PageMetadata) -> LinkPreview {
    let title = metadata
        .title
        .unwrap_or_else(|| defaults::NO_TITLE_FALLBACK.to_string());
    let description = metadata
        .description
        .unwrap_or_else(|| defaults::NO_DESCRIPTION_FALLBACK.to_string());

    LinkPreview {
        title: truncate_chars(&title, defaults::TITLE_MAX_CHARS),
        description: truncate_chars(&description, defaults::DESCRIPTION_MAX_CHARS),
        image: metadata.image,
        site: site_label(parsed),
        url,
    }
}
