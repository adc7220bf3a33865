//! # linkstash-core
//!
//! Core types, traits, and abstractions for the linkstash bookmarking
//! service.
//!
//! This crate provides the foundational data structures and trait
//! definitions that other linkstash crates depend on: the domain models
//! ([`Link`], [`LinkPreview`], [`Page`]), the error type, the repository
//! and service seams ([`LinkRepository`], [`AuthProvider`],
//! [`PreviewFetcher`]), shared limits, and the structured-logging schema.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{AuthUser, Link, LinkPreview, Page};
pub use traits::{AuthProvider, CreateLinkRequest, LinkRepository, ListLinksRequest, PreviewFetcher};
