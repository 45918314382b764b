//! BFF client.
//!
//! The panel talks to the backend-for-frontend through [`ActivityClient`], so
//! the transport can be swapped out (the host binary uses
//! [`HttpActivityClient`], tests script their own outcomes).

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::activity::ActivityResponse;
use crate::auth::AuthContext;

/// Path appended to the configured base URL.
pub const ACTIVITY_PATH: &str = "/mfe/activity";
pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLES_HEADER: &str = "x-roles";

/// Every way a single fetch attempt can fail. All of them are retryable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    Decode(String),
}

/// One `GET /mfe/activity` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRequest {
    pub url: String,
    pub user_id: String,
    pub roles: String,
}

impl ActivityRequest {
    /// `{base}/mfe/activity`. The base is used verbatim.
    pub fn new(bff_base_url: &str, auth: &AuthContext) -> Self {
        Self {
            url: format!("{}{}", bff_base_url, ACTIVITY_PATH),
            user_id: auth.user_id.clone(),
            roles: auth.roles_header(),
        }
    }
}

/// Transport used by the activity panel.
#[async_trait]
pub trait ActivityClient: Send + Sync {
    async fn fetch_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, FetchError>;
}

/// reqwest-backed client. No request timeout is configured; the attempt
/// count is the only failure bound.
#[derive(Debug, Clone, Default)]
pub struct HttpActivityClient {
    client: reqwest::Client,
}

impl HttpActivityClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityClient for HttpActivityClient {
    async fn fetch_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, FetchError> {
        debug!(url = %request.url, user_id = %request.user_id, "GET activity");

        let response = self
            .client
            .get(&request.url)
            .header(USER_ID_HEADER, &request.user_id)
            .header(ROLES_HEADER, &request.roles)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
