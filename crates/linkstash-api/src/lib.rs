//! linkstash-api - HTTP API server for linkstash.
//!
//! Wires the bookmark repository, identity provider, and preview service
//! behind the REST surface. All three dependencies enter through
//! [`AppState`] as trait objects so tests can substitute doubles.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod validation;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::Request;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use linkstash_core::{AuthProvider, LinkRepository, PreviewFetcher};

/// Maximum accepted request body size in bytes.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which is
/// useful for log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Bookmark persistence.
    pub links: Arc<dyn LinkRepository>,
    /// Bearer-token verification against the identity subsystem.
    pub auth: Arc<dyn AuthProvider>,
    /// Link preview fetching.
    pub previews: Arc<dyn PreviewFetcher>,
    /// Process start, for the health endpoint's uptime.
    started_at: Instant,
}

impl AppState {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        auth: Arc<dyn AuthProvider>,
        previews: Arc<dyn PreviewFetcher>,
    ) -> Self {
        Self {
            links,
            auth,
            previews,
            started_at: Instant::now(),
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with all routes and ambient layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/links/preview", post(handlers::links::preview_link))
        .route(
            "/api/links",
            post(handlers::links::create_link).get(handlers::links::list_links),
        )
        .route("/api/links/:id", delete(handlers::links::delete_link))
        .route("/api/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs(),
    }))
}
