//! Core traits for linkstash abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. All dependencies
//! are passed into components at construction; there are no module-level
//! client singletons.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AuthUser, Link, LinkPreview, Page};

// =============================================================================
// LINK REPOSITORY
// =============================================================================

/// Request for creating a bookmark.
///
/// `user_id` is deliberately absent: ownership is stamped from the
/// authenticated caller, never taken from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tags: Vec<String>,
}

/// Request for listing bookmarks.
///
/// All fields optional; defaults (page 1, page size 20) are applied at the
/// repository. `search` and `tag` compose with the ownership and
/// soft-delete predicate, never replace it.
#[derive(Debug, Clone, Default)]
pub struct ListLinksRequest {
    /// 1-based page index.
    pub page: Option<i64>,
    /// Rows per page, clamped to [1, 100].
    pub page_size: Option<i64>,
    /// Case-insensitive literal substring match over title, description, URL.
    pub search: Option<String>,
    /// Exact, case-sensitive tag element match.
    pub tag: Option<String>,
}

/// Repository for bookmark CRUD operations.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a new bookmark owned by `user_id` and return the persisted record.
    async fn insert(&self, user_id: Uuid, req: CreateLinkRequest) -> Result<Link>;

    /// Fetch a single active bookmark, scoped to its owner.
    ///
    /// `Ok(None)` for a missing, deleted, or foreign-owned id; errors are
    /// reserved for store faults.
    async fn get(&self, user_id: Uuid, link_id: Uuid) -> Result<Option<Link>>;

    /// List active bookmarks with filtering and pagination.
    async fn list(&self, user_id: Uuid, req: ListLinksRequest) -> Result<Page>;

    /// Soft-delete a bookmark scoped to its owner.
    ///
    /// Returns the number of rows affected: 0 when the id does not exist,
    /// belongs to another user, or was already deleted. Never an error in
    /// any of those cases, so a second delete is a no-op.
    async fn soft_delete(&self, user_id: Uuid, link_id: Uuid) -> Result<u64>;
}

// =============================================================================
// IDENTITY PROVIDER
// =============================================================================

/// Verifies bearer tokens against the external identity subsystem.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a bearer token to its user.
    ///
    /// `Ok(None)` means the token was rejected (invalid or expired);
    /// `Err` is reserved for transport faults reaching the provider.
    async fn verify_token(&self, token: &str) -> Result<Option<AuthUser>>;
}

// =============================================================================
// PREVIEW SERVICE
// =============================================================================

/// Produces a normalized link preview for an arbitrary, untrusted URL.
#[async_trait]
pub trait PreviewFetcher: Send + Sync {
    /// Fetch and parse `url`, returning a complete preview or a single
    /// `Error::Preview` carrying the URL and cause. Never partial.
    async fn fetch_preview(&self, url: &str) -> Result<LinkPreview>;
}
