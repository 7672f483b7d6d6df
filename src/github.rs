//! Outbound client for the GitHub repository-listing route.

use crate::types::{AppError, GithubRepo, Result};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("devconnect/", env!("CARGO_PKG_VERSION"));

/// Read-only GitHub API client.
///
/// Shared across requests; the optional token raises rate limits but is not
/// required. Any failure - network, unknown user, rate limiting - surfaces
/// to the route as the same "No Github profile found" condition.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Creates a client against the real GitHub API.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Creates a client against an alternate base URL (used by tests to
    /// point at a stub server).
    pub fn with_base_url(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Internal(format!("Invalid GitHub base URL: {}", e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    /// Fetches the user's five most recently created public repositories.
    pub async fn recent_repos(&self, username: &str) -> Result<Vec<GithubRepo>> {
        let mut url = self
            .base_url
            .join(&format!("users/{}/repos", username))
            .map_err(|_| AppError::NotFound("No Github profile found".to_string()))?;
        url.query_pairs_mut()
            .append_pair("per_page", "5")
            .append_pair("sort", "created:asc");

        let mut request = self.http.get(url).header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, username, "github request failed");
            AppError::NotFound("No Github profile found".to_string())
        })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), username, "github returned non-success");
            return Err(AppError::NotFound("No Github profile found".to_string()));
        }

        response
            .json::<Vec<GithubRepo>>()
            .await
            .map_err(|_| AppError::NotFound("No Github profile found".to_string()))
    }
}
