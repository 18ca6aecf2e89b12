//! GitHub REST and GraphQL client

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, LINK};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::graphql::{
    self, GraphQlRequest, GraphQlResponse, LatestReleaseData, ManifestObject, OrganizationNodes,
    PinnedItems, RepositoryData, SearchData, UserData,
};
use super::pagination::{PER_PAGE, Page, has_next_link};
use super::rate_limit::{EndpointCategory, RateLimiterSet, is_rate_limited};
use super::{
    ApiResult, ClientOptions, DependabotAlert, Event, GitHubApi, Organization, PackageManifest,
    Release, Repository, SocialAccount, TrafficViews, USER_AGENT, User, check_status,
    clean_version_tag, parse_json, retry_after,
};
use crate::error::ApiError;

/// REST API version pinned in every request
const API_VERSION: &str = "2022-11-28";

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
    graphql_url: String,
    token: Option<String>,
    rate_limiters: Arc<RateLimiterSet>,
}

impl GitHubClient {
    /// Create a client for the API at `options.base_url`
    pub fn new(options: ClientOptions) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if options.token.is_none() {
            warn!("GH_TOKEN is not set; GitHub requests are unauthenticated and GraphQL data is unavailable");
        }

        let base_url = options.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            graphql_url: format!("{}/graphql", base_url),
            base_url,
            token: options.token,
            rate_limiters: options.rate_limiters,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send one request, honouring and feeding the reactive rate limiter
    async fn send(&self, category: EndpointCategory, request: RequestBuilder) -> ApiResult<Response> {
        self.rate_limiters.wait_for(category).await;

        let response = request.send().await.map_err(ApiError::from)?;
        if is_rate_limited(response.status(), response.headers()) {
            self.rate_limiters
                .activate(category, retry_after(response.headers()))
                .await;
        }
        Ok(response)
    }

    async fn rest_get(&self, path: &str) -> ApiResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        self.send(EndpointCategory::GitHubRest, self.authorize(self.http.get(&url)))
            .await
    }

    async fn rest_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = check_status(self.rest_get(path).await?, path).await?;
        parse_json(response, path).await
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        request: GraphQlRequest<'_>,
        resource: &str,
    ) -> ApiResult<T> {
        debug!("POST {} ({})", self.graphql_url, resource);
        let builder = self.authorize(self.http.post(&self.graphql_url)).json(&request);
        let response = self.send(EndpointCategory::GitHubGraphQl, builder).await?;
        let response = check_status(response, resource).await?;
        let envelope: GraphQlResponse<T> = parse_json(response, resource).await?;
        envelope.into_data()
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> ApiResult<User> {
        self.rest_json(&format!("/users/{}", username)).await
    }

    async fn list_repos(&self, username: &str) -> ApiResult<Vec<Repository>> {
        self.rest_json(&format!("/users/{}/repos?per_page={}", username, PER_PAGE))
            .await
    }

    async fn list_social_accounts(&self, username: &str) -> ApiResult<Vec<SocialAccount>> {
        self.rest_json(&format!("/users/{}/social_accounts", username))
            .await
    }

    async fn pinned_repo_names(&self, username: &str) -> ApiResult<Vec<String>> {
        let request = GraphQlRequest::new(graphql::PINNED_REPOS).var("login", username);
        let data: UserData<PinnedItems> = self.graphql(request, "pinned repositories").await?;

        let user = data
            .user
            .ok_or_else(|| ApiError::NotFound(format!("user {}", username)))?;
        Ok(user
            .pinned_items
            .nodes
            .into_iter()
            .flatten()
            .filter_map(|node| node.name)
            .collect())
    }

    async fn list_organizations(&self, username: &str) -> ApiResult<Vec<Organization>> {
        let request = GraphQlRequest::new(graphql::ORGANIZATIONS).var("login", username);
        let data: UserData<OrganizationNodes> = self.graphql(request, "organizations").await?;

        // Unknown logins and organization accounts come back as a null user
        let Some(user) = data.user else {
            debug!("No user node for {}, no organizations", username);
            return Ok(Vec::new());
        };
        Ok(user.organizations.nodes.into_iter().flatten().collect())
    }

    async fn package_manifest(
        &self,
        owner: &str,
        repo: &str,
    ) -> ApiResult<Option<PackageManifest>> {
        let request = GraphQlRequest::new(graphql::PACKAGE_MANIFEST)
            .var("owner", owner)
            .var("name", repo);
        let data: RepositoryData<ManifestObject> = self.graphql(request, "package.json").await?;

        let repository = data
            .repository
            .ok_or_else(|| ApiError::NotFound(format!("{}/{}", owner, repo)))?;
        let Some(text) = repository.object.and_then(|blob| blob.text) else {
            return Ok(None);
        };

        serde_json::from_str(&text).map(Some).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "package.json in {}/{} is not valid JSON: {}",
                owner, repo, e
            ))
        })
    }

    async fn latest_release(&self, owner: &str, repo: &str) -> ApiResult<Option<Release>> {
        let request = GraphQlRequest::new(graphql::LATEST_RELEASE)
            .var("owner", owner)
            .var("name", repo);
        let data: RepositoryData<LatestReleaseData> =
            self.graphql(request, "latest release").await?;

        let repository = data
            .repository
            .ok_or_else(|| ApiError::NotFound(format!("{}/{}", owner, repo)))?;
        Ok(repository.latest_release.map(|raw| Release {
            tag_name: clean_version_tag(&raw.tag_name),
            updated_at: raw.updated_at,
        }))
    }

    async fn events_page(&self, username: &str, page: u32) -> ApiResult<Page<Event>> {
        let path = format!(
            "/users/{}/events?per_page={}&page={}",
            username, PER_PAGE, page
        );
        let response = check_status(self.rest_get(&path).await?, &path).await?;

        let has_next = has_next_link(
            response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok()),
        );
        let items: Vec<Event> = parse_json(response, &path).await?;
        Ok(Page { items, has_next })
    }

    async fn traffic_views(&self, owner: &str, repo: &str) -> ApiResult<TrafficViews> {
        self.rest_json(&format!("/repos/{}/{}/traffic/views", owner, repo))
            .await
    }

    async fn dependabot_alerts(&self, owner: &str, repo: &str) -> ApiResult<Vec<DependabotAlert>> {
        let path = format!("/repos/{}/{}/dependabot/alerts", owner, repo);
        let body: serde_json::Value = self.rest_json(&path).await?;

        // Repositories without Dependabot answer with an object instead of a list
        if !body.is_array() {
            debug!("{} did not return a list, treating as no alerts", path);
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {} response: {}", path, e))
        })
    }

    async fn path_exists(&self, owner: &str, repo: &str, path: &str) -> ApiResult<bool> {
        let resource = format!("/repos/{}/{}/contents/{}", owner, repo, path);
        let response = self.rest_get(&resource).await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => check_status(response, &resource).await.map(|_| false),
        }
    }

    async fn search_issue_count(&self, query: &str) -> ApiResult<u64> {
        let request = GraphQlRequest::new(graphql::SEARCH_COUNT).var("q", query);
        let data: SearchData = self.graphql(request, "issue search").await?;
        Ok(data.search.issue_count)
    }
}
