//! HTTP client for the backend REST service.
//!
//! Carries the cross-cutting concerns every endpoint shares: bearer-token
//! injection read from the session vault at call time, decoding of the
//! backend's structured `{"detail"}` error bodies, and the global 401
//! interceptor — any unauthorized response from any endpoint invalidates
//! the persisted session before the error is returned.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::SessionVault;

use super::types::ErrorBody;

/// Client for the driver-onboarding backend.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    vault: Arc<SessionVault>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, vault: Arc<SessionVault>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            vault,
        })
    }

    /// The session vault this client invalidates through.
    pub fn vault(&self) -> &Arc<SessionVault> {
        &self.vault
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Attach `Authorization: Bearer <token>` from the persisted session,
    /// read at call time. Requests without a stored token go out bare.
    pub(crate) async fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match self.vault.load().await.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a prepared request and run the shared response policy.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        fallback_message: &str,
    ) -> Result<Response> {
        let response = request.send().await.map_err(ApiError::from)?;
        self.check(response, fallback_message).await
    }

    /// Uniform response handling: 2xx passes through, 401 invalidates the
    /// session globally, anything else becomes an [`ApiError::Status`]
    /// carrying the backend's `detail` when present.
    async fn check(&self, response: Response, fallback_message: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Received 401, invalidating session");
            self.vault.invalidate().await;
            return Err(ApiError::Unauthorized.into());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| fallback_message.to_string());

        tracing::warn!(status = status.as_u16(), "Request failed: {message}");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn client(base_url: &str) -> ApiClient {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        let vault = Arc::new(SessionVault::new(Arc::new(MemoryStore::new())));
        ApiClient::new(&config, vault).unwrap()
    }

    #[test]
    fn url_joins_paths() {
        let api = client("http://localhost:8000");
        assert_eq!(api.url("/auth/login"), "http://localhost:8000/auth/login");
    }

    #[test]
    fn url_strips_trailing_slash() {
        let api = client("http://localhost:8000/");
        assert_eq!(api.url("/driver/me"), "http://localhost:8000/driver/me");
    }

    #[tokio::test]
    async fn request_without_token_has_no_auth_header() {
        let api = client("http://localhost:8000");
        let request = api.authed(api.http().get(api.url("/driver/me"))).await;
        let built = request.build().unwrap();
        assert!(built.headers().get("authorization").is_none());
    }

    #[tokio::test]
    async fn request_with_token_carries_bearer_header() {
        let api = client("http://localhost:8000");
        let session = crate::session::Session::authenticated(
            "tok-abc",
            crate::session::UserProfile::minimal("a@b.com"),
        );
        api.vault().save(&session).await.unwrap();

        let request = api.authed(api.http().get(api.url("/driver/me"))).await;
        let built = request.build().unwrap();
        let header = built.headers().get("authorization").unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer tok-abc");
    }
}
