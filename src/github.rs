use crate::error::{RankingError, Result};
use crate::types::GitHubRepo;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

pub const API_BASE_URL: &str = "https://api.github.com";

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Build a client against a different API root (GitHub Enterprise, or a local stand-in).
    pub fn with_base_url(token: Option<String>, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("star-ranking/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            client,
            token: token.filter(|t| !t.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        match response.status() {
            reqwest::StatusCode::OK => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(RankingError::NotFound(format!("Resource not found: {}", url)))
            }
            reqwest::StatusCode::FORBIDDEN | reqwest::StatusCode::TOO_MANY_REQUESTS
                if rate_limit_remaining == Some(0) =>
            {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<i64>().ok())
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0));
                Err(RankingError::RateLimitExceeded(match reset {
                    Some(at) => format!("API rate limit exceeded. Reset at: {}", at),
                    None => "API rate limit exceeded".to_string(),
                }))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(RankingError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    pub async fn get_repository_info(&self, owner: &str, repo: &str) -> Result<GitHubRepo> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        debug!("Fetching repo: {}/{}", owner, repo);
        let response = self.make_request(&url).await?;
        let repo_data: GitHubRepo = response.json().await?;
        Ok(repo_data)
    }
}
