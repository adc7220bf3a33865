//! Shared defaults and limits for linkstash.
//!
//! Single source of truth for values enforced in more than one crate
//! (boundary validation, repository clamping, preview normalization).

/// Maximum length of a bookmark/preview title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum length of a bookmark/preview description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Maximum number of tags on a bookmark.
pub const MAX_TAGS: usize = 10;

/// First page of a paginated listing (pages are 1-based).
pub const DEFAULT_PAGE: i64 = 1;

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on the requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Timeout for a preview page fetch, in seconds.
pub const PREVIEW_TIMEOUT_SECS: u64 = 5;

/// Identifying User-Agent sent with preview fetches.
pub const PREVIEW_USER_AGENT: &str = "Mozilla/5.0 (compatible; LinkstashBot/1.0)";

/// Title used when a page exposes no usable title source.
pub const NO_TITLE_FALLBACK: &str = "No title available";

/// Description used when a page exposes no usable description source.
pub const NO_DESCRIPTION_FALLBACK: &str = "No description available";
