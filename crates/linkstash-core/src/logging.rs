//! Structured logging schema and field name constants for linkstash.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |

/// Correlation ID propagated per request. Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "preview", "identity"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem. Examples: "pool", "links", "fetch"
pub const COMPONENT: &str = "component";

/// Logical operation name. Examples: "list", "insert", "fetch_preview"
pub const OPERATION: &str = "op";

/// Owner UUID the operation is scoped to.
pub const USER_ID: &str = "user_id";

/// Bookmark UUID being operated on.
pub const LINK_ID: &str = "link_id";

/// URL being fetched or stored.
pub const URL: &str = "url";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a listing.
pub const RESULT_COUNT: &str = "result_count";

/// Number of rows affected by a mutation.
pub const ROWS_AFFECTED: &str = "rows_affected";

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
