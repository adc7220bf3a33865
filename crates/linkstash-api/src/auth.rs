//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use linkstash_core::AuthUser;

use crate::error::ApiError;
use crate::AppState;

/// Extractor for endpoints that require an authenticated user.
///
/// Validates the `Authorization: Bearer <token>` header against the
/// configured identity provider and hands the verified user to the
/// handler. Ownership scoping uses only `user.id`.
///
/// Usage:
/// ```ignore
/// async fn my_handler(auth: Auth) -> impl IntoResponse {
///     let owner = auth.user.id;
///     // ... handler logic
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Auth {
    pub user: AuthUser,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = match auth_header {
            Some(value) if value.starts_with("Bearer ") => {
                value.trim_start_matches("Bearer ").trim()
            }
            _ => {
                return Err(ApiError::Unauthorized(
                    "No authorization token provided".to_string(),
                ))
            }
        };

        // A transport fault reaching the provider is a server error; a
        // rejected token is the caller's problem.
        let user = state
            .auth
            .verify_token(token)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(Auth { user })
    }
}
