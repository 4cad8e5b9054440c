//! reqwest-based client for the backend REST API

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use textlands_protocol::WorldId;
use url::Url;

use super::error::ApiError;
use super::types::{
    ActionOutcome, BountyInfo, CreateWorldRequest, SessionInfo, WorldSummary, WorldTemplate,
};

/// Client-side timeout, distinct from whatever the server enforces
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape the backend uses for non-2xx responses
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for the backend REST API.
///
/// Carries the session cookie on every request; cloning shares the cookie
/// jar and connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Build a client against `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit client-side timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base url: {base_url}"))?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Connection(format!("invalid endpoint {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.endpoint(path)?).send().await?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.endpoint(path)?).json(body).send().await?;
        Self::decode(response).await
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self.http.post(self.endpoint(path)?).json(body).send().await?;
        Self::check(response).await.map(|_| ())
    }

    /// Map a non-2xx response to `ApiError::Server`, surfacing the body's
    /// `detail` field verbatim; an unparseable body becomes "Unknown error".
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // -- auth ---------------------------------------------------------------

    /// Ask the backend to email a magic sign-in link.
    pub async fn request_magic_link(&self, email: &str) -> Result<(), ApiError> {
        self.post_unit("/auth/magic-link", &serde_json::json!({ "email": email }))
            .await
    }

    /// Redeem a magic-link token for a session.
    pub async fn verify_magic_link(&self, token: &str) -> Result<SessionInfo, ApiError> {
        self.post_json("/auth/verify", &serde_json::json!({ "token": token }))
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_unit("/auth/logout", &serde_json::json!({})).await
    }

    /// The current session, or `None` when not signed in.
    pub async fn current_session(&self) -> Result<Option<SessionInfo>, ApiError> {
        match self.get_json("/auth/session").await {
            Ok(session) => Ok(Some(session)),
            Err(ApiError::Server { status, .. }) if status == StatusCode::UNAUTHORIZED.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    // -- game actions -------------------------------------------------------

    pub async fn look(&self) -> Result<ActionOutcome, ApiError> {
        self.post_json("/game/look", &serde_json::json!({})).await
    }

    pub async fn move_to(&self, direction: &str) -> Result<ActionOutcome, ApiError> {
        self.post_json("/game/move", &serde_json::json!({ "direction": direction }))
            .await
    }

    pub async fn talk(&self, target: &str, message: &str) -> Result<ActionOutcome, ApiError> {
        self.post_json(
            "/game/talk",
            &serde_json::json!({ "target": target, "message": message }),
        )
        .await
    }

    pub async fn action(&self, text: &str) -> Result<ActionOutcome, ApiError> {
        self.post_json("/game/action", &serde_json::json!({ "action": text }))
            .await
    }

    pub async fn start_combat(&self, target: &str) -> Result<ActionOutcome, ApiError> {
        self.post_json("/game/combat/start", &serde_json::json!({ "target": target }))
            .await
    }

    pub async fn combat_action(&self, action: &str) -> Result<ActionOutcome, ApiError> {
        self.post_json("/game/combat/action", &serde_json::json!({ "action": action }))
            .await
    }

    // -- world browsing -----------------------------------------------------

    pub async fn world_templates(&self) -> Result<Vec<WorldTemplate>, ApiError> {
        self.get_json("/worlds/templates").await
    }

    pub async fn create_world(&self, request: &CreateWorldRequest) -> Result<WorldSummary, ApiError> {
        self.post_json("/worlds", request).await
    }

    pub async fn bounties(&self, world_id: WorldId) -> Result<Vec<BountyInfo>, ApiError> {
        self.get_json(&format!("/worlds/{world_id}/bounties")).await
    }
}
