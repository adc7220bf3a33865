//! Core data models for linkstash.
//!
//! These types are shared across all linkstash crates and represent the
//! domain entities exchanged between the API, preview, and database layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// PREVIEW TYPES
// =============================================================================

/// Metadata extracted from fetching and parsing a URL's HTML.
///
/// Ephemeral: built per request and returned to the caller, never persisted.
/// `title` and `description` are always populated (falling back to sentinel
/// strings when the page exposes nothing usable); `image` is genuinely
/// optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    /// The requested URL, possibly normalized with a scheme prefix.
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hostname of the URL with a leading `www.` stripped.
    pub site: String,
}

// =============================================================================
// BOOKMARK TYPES
// =============================================================================

/// A persisted reading-list entry owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: Uuid,
    /// Owner reference; immutable after creation. Every read and mutation
    /// other than create is scoped to this user.
    pub user_id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ordered tag list; duplicates permitted, at most 10 entries.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; `None` means active. Never cleared.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Whether this bookmark is still visible to queries.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// One bounded slice of a filtered listing, with the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Matching bookmarks, newest `created_at` first.
    pub items: Vec<Link>,
    /// Count of all rows matching the filter, ignoring pagination.
    pub total: i64,
    /// Echo of the requested 1-based page index.
    pub page: i64,
    /// Echo of the requested page size.
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

// =============================================================================
// AUTH TYPES
// =============================================================================

/// Verdict of the external identity provider for a bearer token.
///
/// Trusted unconditionally; only `id` participates in ownership scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub aud: String,
    pub role: String,
}
