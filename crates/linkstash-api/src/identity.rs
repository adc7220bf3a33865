//! HTTP client for the external identity provider.
//!
//! The provider owns token issuance and validation entirely; this client
//! only asks it to resolve a bearer token and trusts the verdict.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use linkstash_core::{AuthProvider, AuthUser, Error, Result};

/// Timeout for identity verification calls, in seconds.
const VERIFY_TIMEOUT_SECS: u64 = 10;

/// Identity provider client resolving bearer tokens to users.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

/// User payload returned by the identity endpoint.
#[derive(Debug, Deserialize)]
struct IdentityUserResponse {
    id: Uuid,
    email: String,
    aud: String,
    role: String,
}

impl IdentityClient {
    /// Create a client for the identity service at `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("failed to build identity client: {}", e)))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create from environment variables (`IDENTITY_URL`, `IDENTITY_API_KEY`).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("IDENTITY_URL")
            .map_err(|_| Error::Config("IDENTITY_URL is not set".to_string()))?;
        let api_key = std::env::var("IDENTITY_API_KEY").ok();
        Self::new(base_url, api_key)
    }
}

#[async_trait]
impl AuthProvider for IdentityClient {
    async fn verify_token(&self, token: &str) -> Result<Option<AuthUser>> {
        let mut request = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(token);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(format!("identity verification failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(
                subsystem = "identity",
                op = "verify_token",
                status = status.as_u16(),
                "Token rejected by identity provider"
            );
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Request(format!(
                "identity service returned HTTP {}",
                status.as_u16()
            )));
        }

        let user: IdentityUserResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(format!("malformed identity response: {}", e)))?;

        Ok(Some(AuthUser {
            id: user.id,
            email: user.email,
            aud: user.aud,
            role: user.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = IdentityClient::new("https://id.example.com/", None).unwrap();
        assert_eq!(client.base_url, "https://id.example.com");
    }

    #[test]
    fn test_from_env_requires_identity_url() {
        std::env::remove_var("IDENTITY_URL");
        assert!(matches!(
            IdentityClient::from_env(),
            Err(Error::Config(_))
        ));
    }
}
