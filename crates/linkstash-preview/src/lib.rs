//! # linkstash-preview
//!
//! Link preview fetching and HTML metadata extraction for linkstash.
//!
//! Turns an arbitrary, untrusted URL into a normalized preview record:
//! a bounded-time, redirect-following fetch ([`fetch::PageFetcher`]),
//! lenient HTML parsing with prioritized field selection
//! ([`extract::extract_metadata`]), and sentinel/truncation normalization
//! ([`HttpPreviewService`]).

pub mod extract;
pub mod fetch;
pub mod service;

pub use extract::{
    extract_metadata, MetaSource, PageMetadata, DESCRIPTION_SOURCES, IMAGE_SOURCES, TITLE_SOURCES,
};
pub use fetch::PageFetcher;
pub use service::HttpPreviewService;
