//! Bookmark HTTP handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use linkstash_core::{CreateLinkRequest, Link, LinkPreview, ListLinksRequest, Page};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::validation;
use crate::AppState;

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for POST /api/links/preview.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub url: String,
}

/// Query parameters for GET /api/links.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

/// Malformed bodies and query strings get the uniform envelope, not the
/// framework's default rejection.
fn bad_json(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Fetch preview metadata for a URL.
///
/// Unauthenticated: previews are ephemeral and touch no user data.
///
/// # Returns
/// - 200 OK with the link preview
/// - 400 Bad Request if the URL is malformed
/// - 500 Internal Server Error if the fetch or parse fails; the message
///   names the failing URL
pub async fn preview_link(
    State(state): State<AppState>,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<LinkPreview>, ApiError> {
    let Json(req) = body.map_err(bad_json)?;
    validation::validate_absolute_url(&req.url)?;

    let preview = state.previews.fetch_preview(&req.url).await?;
    Ok(Json(preview))
}

/// Create a bookmark owned by the authenticated user.
///
/// # Returns
/// - 201 Created with the persisted bookmark
/// - 400 Bad Request if validation fails
/// - 401 Unauthorized without a valid token
pub async fn create_link(
    State(state): State<AppState>,
    auth: Auth,
    body: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let Json(req) = body.map_err(bad_json)?;
    validation::validate_create_link(&req)?;

    let link = state.links.insert(auth.user.id, req).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// List the authenticated user's active bookmarks.
///
/// Supports `search` (case-insensitive literal substring over title,
/// description, URL), `tag` (exact element match), and 1-based
/// `page`/`pageSize` pagination.
///
/// # Returns
/// - 200 OK with `{items, total, page, pageSize}`
/// - 400 Bad Request for out-of-range pagination
/// - 401 Unauthorized without a valid token
pub async fn list_links(
    State(state): State<AppState>,
    auth: Auth,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<Page>, ApiError> {
    let Query(query) = query.map_err(|r| ApiError::BadRequest(r.body_text()))?;
    validation::validate_list_query(query.page, query.page_size)?;

    let page = state
        .links
        .list(
            auth.user.id,
            ListLinksRequest {
                page: query.page,
                page_size: query.page_size,
                search: query.search,
                tag: query.tag,
            },
        )
        .await?;
    Ok(Json(page))
}

/// Soft-delete a bookmark scoped to the authenticated owner.
///
/// Deleting an id that is absent, foreign-owned, or already deleted still
/// answers 204; the affected-row count is only surfaced in logs so existing
/// clients keep their silent-success contract.
///
/// # Returns
/// - 204 No Content
/// - 400 Bad Request if the id is not a UUID
/// - 401 Unauthorized without a valid token
pub async fn delete_link(
    State(state): State<AppState>,
    auth: Auth,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(link_id) = id.map_err(|r| ApiError::BadRequest(r.body_text()))?;

    let affected = state.links.soft_delete(auth.user.id, link_id).await?;
    if affected == 0 {
        debug!(
            subsystem = "api",
            op = "delete_link",
            user_id = %auth.user.id,
            link_id = %link_id,
            "Delete matched no active bookmark"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}
