//! GitHub and Vercel API clients
//!
//! Clients build exactly one upstream request per call and classify the
//! response into [`ApiError`] variants. They never retry and never cache;
//! memoization lives in the gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{Config, DEFAULT_GITHUB_API_URL};
use crate::error::ApiError;

pub mod github;
pub mod graphql;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod parallel;
pub mod rate_limit;
pub mod vercel;

pub use github::GitHubClient;
#[cfg(test)]
pub use mock::{MockGitHubClient, MockVercelClient};
pub use models::*;
pub use pagination::Page;
pub use rate_limit::RateLimiterSet;
pub use vercel::VercelClient;

/// Result of a single upstream call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Turn a non-success response into the matching [`ApiError`].
///
/// `resource` names what was requested, for error messages.
pub(crate) async fn check_status(response: Response, resource: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if rate_limit::is_rate_limited(status, response.headers()) {
        return Err(ApiError::RateLimit(retry_after(response.headers())));
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Access denied".to_string());
            Err(ApiError::Forbidden(format!("{}: {}", resource, error_msg)))
        }
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(resource.to_string())),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            Err(ApiError::BadRequest(format!("{}: {}", resource, error_msg)))
        }
        status if status.is_server_error() => Err(ApiError::ServerError(format!(
            "{} returned {}",
            resource, status
        ))),
        _ => Err(ApiError::InvalidResponse(format!(
            "Unexpected status code {} for {}",
            status, resource
        ))),
    }
}

/// Parse a JSON body, naming the resource on failure
pub(crate) async fn parse_json<T: DeserializeOwned>(
    response: Response,
    resource: &str,
) -> ApiResult<T> {
    response.json::<T>().await.map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse {} response: {}", resource, e))
    })
}

/// How long upstream asked us to back off
pub(crate) fn retry_after(headers: &HeaderMap) -> Duration {
    let header_secs = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    if let Some(secs) = header_secs("retry-after") {
        return Duration::from_secs(secs);
    }
    if let Some(reset_at) = header_secs("x-ratelimit-reset") {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        return Duration::from_secs(reset_at.saturating_sub(now));
    }
    Duration::from_secs(60)
}

/// Settings shared by the HTTP clients
#[derive(Clone)]
pub struct ClientOptions {
    /// API base URL without a trailing slash
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub rate_limiters: Arc<RateLimiterSet>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
            rate_limiters: Arc::new(RateLimiterSet::new()),
        }
    }
}

impl ClientOptions {
    /// Options for the GitHub client
    pub fn github(config: &Config, rate_limiters: Arc<RateLimiterSet>) -> Self {
        Self {
            base_url: config.github_api_url(),
            token: config.github_token.clone(),
            timeout: config.request_timeout(),
            rate_limiters,
        }
    }

    /// Options for the Vercel client, `None` when no token is configured
    pub fn vercel(config: &Config, rate_limiters: Arc<RateLimiterSet>) -> Option<Self> {
        let token = config.vercel_token.clone()?;
        Some(Self {
            base_url: config.vercel_api_url(),
            token: Some(token),
            timeout: config.request_timeout(),
            rate_limiters,
        })
    }
}

/// GitHub REST and GraphQL operations used by the gateway
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /users/{username}`
    async fn get_user(&self, username: &str) -> ApiResult<User>;

    /// `GET /users/{username}/repos`
    async fn list_repos(&self, username: &str) -> ApiResult<Vec<Repository>>;

    /// `GET /users/{username}/social_accounts`
    async fn list_social_accounts(&self, username: &str) -> ApiResult<Vec<SocialAccount>>;

    /// Names of the repositories pinned on the profile (GraphQL)
    async fn pinned_repo_names(&self, username: &str) -> ApiResult<Vec<String>>;

    /// Organizations the user is a public member of (GraphQL)
    async fn list_organizations(&self, username: &str) -> ApiResult<Vec<Organization>>;

    /// `package.json` at HEAD, `None` when the repository has none (GraphQL)
    async fn package_manifest(&self, owner: &str, repo: &str)
    -> ApiResult<Option<PackageManifest>>;

    /// Latest published release, `None` when there is none (GraphQL)
    async fn latest_release(&self, owner: &str, repo: &str) -> ApiResult<Option<Release>>;

    /// One page of `GET /users/{username}/events`
    async fn events_page(&self, username: &str, page: u32) -> ApiResult<Page<Event>>;

    /// `GET /repos/{owner}/{repo}/traffic/views`
    async fn traffic_views(&self, owner: &str, repo: &str) -> ApiResult<TrafficViews>;

    /// `GET /repos/{owner}/{repo}/dependabot/alerts`
    async fn dependabot_alerts(&self, owner: &str, repo: &str) -> ApiResult<Vec<DependabotAlert>>;

    /// Whether `path` exists in the default branch (contents API probe)
    async fn path_exists(&self, owner: &str, repo: &str, path: &str) -> ApiResult<bool>;

    /// `issueCount` of a GraphQL issue/PR search
    async fn search_issue_count(&self, query: &str) -> ApiResult<u64>;
}

/// Vercel operations used by the gateway
#[async_trait]
pub trait VercelApi: Send + Sync {
    /// `GET /v9/projects`
    async fn list_projects(&self) -> ApiResult<Vec<VercelProject>>;
}
