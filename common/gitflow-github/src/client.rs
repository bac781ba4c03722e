//! GitHub client implementation

use crate::error::ApiError;
use reqwest::{Method, RequestBuilder, Response};
use std::fmt;
use std::time::Duration;

/// Public GitHub API base URL
pub const API_BASE: &str = "https://api.github.com";

/// Upper bound on a single API round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("gitflow/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for making authenticated requests
///
/// Every request carries the bearer token, the v3 media type and the
/// gitflow user agent. Non-2xx responses are turned into [`ApiError`]
/// before the caller sees them.
pub struct GitHubClient {
    pub(crate) client: reqwest::Client,
    pub(crate) token: String,
    pub(crate) api_base: String,
}

impl GitHubClient {
    /// Create a client against the public GitHub API
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_api_base(token, API_BASE)
    }

    /// Create a client against a custom API base (GitHub Enterprise or a test server)
    pub fn with_api_base(
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL requests are sent to
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    /// Send a request and classify any non-success status
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        Err(ApiError::from_response(response).await)
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &"***")
            .finish()
    }
}
