//! Vercel REST client

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;

use super::rate_limit::{EndpointCategory, RateLimiterSet, is_rate_limited};
use super::{
    ApiResult, ClientOptions, USER_AGENT, VercelApi, VercelProject, VercelProjectList,
    check_status, parse_json, retry_after,
};
use crate::error::ApiError;

/// Vercel API client.
///
/// Only constructed when a token is configured.
pub struct VercelClient {
    http: HttpClient,
    base_url: String,
    token: String,
    rate_limiters: Arc<RateLimiterSet>,
}

impl VercelClient {
    pub fn new(options: ClientOptions) -> ApiResult<Self> {
        let token = options.token.ok_or(ApiError::Unauthorized)?;
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            token,
            rate_limiters: options.rate_limiters,
        })
    }
}

#[async_trait]
impl VercelApi for VercelClient {
    async fn list_projects(&self) -> ApiResult<Vec<VercelProject>> {
        let path = "/v9/projects";
        let url = format!("{}{}", self.base_url, path);

        self.rate_limiters.wait_for(EndpointCategory::Vercel).await;
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ApiError::from)?;

        if is_rate_limited(response.status(), response.headers()) {
            self.rate_limiters
                .activate(EndpointCategory::Vercel, retry_after(response.headers()))
                .await;
        }

        let response = check_status(response, "Vercel projects").await?;
        let list: VercelProjectList = parse_json(response, "Vercel projects").await?;
        Ok(list.projects)
    }
}
