//! Mock GitHub and Vercel clients for testing
//!
//! Canned responses are configured through builder methods; every call is
//! counted so tests can assert how often upstream was hit.

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    ApiResult, DependabotAlert, Event, GitHubApi, Organization, PackageManifest, Page, Release,
    Repository, SocialAccount, TrafficViews, User, VercelApi, VercelProject,
};
use crate::error::ApiError;

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_user: usize,
    pub list_repos: usize,
    pub list_social_accounts: usize,
    pub pinned_repo_names: usize,
    pub list_organizations: usize,
    pub package_manifest: usize,
    pub latest_release: usize,
    pub events_page: usize,
    pub traffic_views: usize,
    pub dependabot_alerts: usize,
    pub path_exists: usize,
    pub search_issue_count: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_user
            + self.list_repos
            + self.list_social_accounts
            + self.pinned_repo_names
            + self.list_organizations
            + self.package_manifest
            + self.latest_release
            + self.events_page
            + self.traffic_views
            + self.dependabot_alerts
            + self.path_exists
            + self.search_issue_count
    }

    fn bump(&mut self, method: &str) {
        let counter = match method {
            "get_user" => &mut self.get_user,
            "list_repos" => &mut self.list_repos,
            "list_social_accounts" => &mut self.list_social_accounts,
            "pinned_repo_names" => &mut self.pinned_repo_names,
            "list_organizations" => &mut self.list_organizations,
            "package_manifest" => &mut self.package_manifest,
            "latest_release" => &mut self.latest_release,
            "events_page" => &mut self.events_page,
            "traffic_views" => &mut self.traffic_views,
            "dependabot_alerts" => &mut self.dependabot_alerts,
            "path_exists" => &mut self.path_exists,
            _ => &mut self.search_issue_count,
        };
        *counter += 1;
    }
}

/// Mock GitHub client.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new().with_user(User { login: "octocat".into(), ..Default::default() });
/// let gateway = Gateway::new(mock, None::<MockVercelClient>, clock);
/// ```
#[derive(Default)]
pub struct MockGitHubClient {
    user: Option<User>,
    repos: Vec<Repository>,
    social_accounts: Vec<SocialAccount>,
    pinned: Vec<String>,
    organizations: Vec<Organization>,
    /// Keyed by `owner/repo`
    manifests: HashMap<String, PackageManifest>,
    releases: HashMap<String, Release>,
    traffic: HashMap<String, TrafficViews>,
    alerts: HashMap<String, Vec<DependabotAlert>>,
    /// `owner/repo/path` entries that exist
    paths: HashSet<String>,
    search_counts: HashMap<String, u64>,
    event_pages: Vec<Vec<Event>>,
    failing_pages: HashMap<u32, ApiError>,
    /// Errors returned for every call of a method
    always_fail: HashMap<&'static str, ApiError>,
    /// Errors consumed one per call, before canned data
    queued_errors: Mutex<HashMap<&'static str, VecDeque<ApiError>>>,
    latency: Option<Duration>,
    call_count: Mutex<CallCounts>,
    captured_requests: Mutex<Vec<CapturedRequest>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub method: &'static str,
    /// Call arguments joined with `/`
    pub target: String,
}

fn repo_key(owner: &str, repo: &str) -> String {
    format!("{}/{}", owner, repo)
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_repos(mut self, repos: Vec<Repository>) -> Self {
        self.repos = repos;
        self
    }

    pub fn with_social_accounts(mut self, accounts: Vec<SocialAccount>) -> Self {
        self.social_accounts = accounts;
        self
    }

    pub fn with_pinned(mut self, names: &[&str]) -> Self {
        self.pinned = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_organizations(mut self, orgs: Vec<Organization>) -> Self {
        self.organizations = orgs;
        self
    }

    pub fn with_manifest(mut self, owner: &str, repo: &str, manifest: PackageManifest) -> Self {
        self.manifests.insert(repo_key(owner, repo), manifest);
        self
    }

    pub fn with_release(mut self, owner: &str, repo: &str, tag: &str) -> Self {
        self.releases.insert(
            repo_key(owner, repo),
            Release {
                tag_name: tag.to_string(),
                updated_at: None,
            },
        );
        self
    }

    pub fn with_traffic(mut self, owner: &str, repo: &str, views: TrafficViews) -> Self {
        self.traffic.insert(repo_key(owner, repo), views);
        self
    }

    pub fn with_alerts(mut self, owner: &str, repo: &str, alerts: Vec<DependabotAlert>) -> Self {
        self.alerts.insert(repo_key(owner, repo), alerts);
        self
    }

    pub fn with_path(mut self, owner: &str, repo: &str, path: &str) -> Self {
        self.paths.insert(format!("{}/{}/{}", owner, repo, path));
        self
    }

    pub fn with_search_count(mut self, query: &str, count: u64) -> Self {
        self.search_counts.insert(query.to_string(), count);
        self
    }

    /// Event pages; every page but the last advertises a next page
    pub fn with_event_pages(mut self, pages: Vec<Vec<Event>>) -> Self {
        self.event_pages = pages;
        self
    }

    /// Fail one page of the events walk
    pub fn with_failing_page(mut self, page: u32, error: ApiError) -> Self {
        self.failing_pages.insert(page, error);
        self
    }

    /// Fail every call of `method`
    pub fn failing(mut self, method: &'static str, error: ApiError) -> Self {
        self.always_fail.insert(method, error);
        self
    }

    /// Delay every call, to widen race windows in concurrency tests
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail the next call of `method` only.
    pub async fn with_error(self, method: &'static str, error: ApiError) -> Self {
        self.queued_errors
            .lock()
            .await
            .entry(method)
            .or_default()
            .push_back(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Count the call, wait out the latency and return any scripted error.
    async fn record(&self, method: &'static str, target: String) -> ApiResult<()> {
        self.call_count.lock().await.bump(method);
        self.captured_requests
            .lock()
            .await
            .push(CapturedRequest { method, target });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = self
            .queued_errors
            .lock()
            .await
            .get_mut(method)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        if let Some(error) = self.always_fail.get(method) {
            return Err(error.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn get_user(&self, username: &str) -> ApiResult<User> {
        self.record("get_user", username.to_string()).await?;
        self.user
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("user {}", username)))
    }

    async fn list_repos(&self, username: &str) -> ApiResult<Vec<Repository>> {
        self.record("list_repos", username.to_string()).await?;
        Ok(self.repos.clone())
    }

    async fn list_social_accounts(&self, username: &str) -> ApiResult<Vec<SocialAccount>> {
        self.record("list_social_accounts", username.to_string())
            .await?;
        Ok(self.social_accounts.clone())
    }

    async fn pinned_repo_names(&self, username: &str) -> ApiResult<Vec<String>> {
        self.record("pinned_repo_names", username.to_string())
            .await?;
        Ok(self.pinned.clone())
    }

    async fn list_organizations(&self, username: &str) -> ApiResult<Vec<Organization>> {
        self.record("list_organizations", username.to_string())
            .await?;
        Ok(self.organizations.clone())
    }

    async fn package_manifest(
        &self,
        owner: &str,
        repo: &str,
    ) -> ApiResult<Option<PackageManifest>> {
        let key = repo_key(owner, repo);
        self.record("package_manifest", key.clone()).await?;
        Ok(self.manifests.get(&key).cloned())
    }

    async fn latest_release(&self, owner: &str, repo: &str) -> ApiResult<Option<Release>> {
        let key = repo_key(owner, repo);
        self.record("latest_release", key.clone()).await?;
        Ok(self.releases.get(&key).cloned())
    }

    async fn events_page(&self, username: &str, page: u32) -> ApiResult<Page<Event>> {
        self.record("events_page", format!("{}/{}", username, page))
            .await?;
        if let Some(error) = self.failing_pages.get(&page) {
            return Err(error.clone());
        }

        let index = page.saturating_sub(1) as usize;
        let items = self.event_pages.get(index).cloned().unwrap_or_default();
        Ok(Page {
            items,
            has_next: index + 1 < self.event_pages.len(),
        })
    }

    async fn traffic_views(&self, owner: &str, repo: &str) -> ApiResult<TrafficViews> {
        let key = repo_key(owner, repo);
        self.record("traffic_views", key.clone()).await?;
        Ok(self.traffic.get(&key).cloned().unwrap_or_default())
    }

    async fn dependabot_alerts(&self, owner: &str, repo: &str) -> ApiResult<Vec<DependabotAlert>> {
        let key = repo_key(owner, repo);
        self.record("dependabot_alerts", key.clone()).await?;
        Ok(self.alerts.get(&key).cloned().unwrap_or_default())
    }

    async fn path_exists(&self, owner: &str, repo: &str, path: &str) -> ApiResult<bool> {
        let key = format!("{}/{}/{}", owner, repo, path);
        self.record("path_exists", key.clone()).await?;
        Ok(self.paths.contains(&key))
    }

    async fn search_issue_count(&self, query: &str) -> ApiResult<u64> {
        self.record("search_issue_count", query.to_string())
            .await?;
        Ok(self.search_counts.get(query).copied().unwrap_or(0))
    }
}

/// Mock Vercel client
#[derive(Default)]
pub struct MockVercelClient {
    projects: Vec<VercelProject>,
    error: Option<ApiError>,
    calls: Mutex<usize>,
}

impl MockVercelClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(mut self, projects: Vec<VercelProject>) -> Self {
        self.projects = projects;
        self
    }

    /// Fail every call
    pub fn failing(mut self, error: ApiError) -> Self {
        self.error = Some(error);
        self
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl VercelApi for MockVercelClient {
    async fn list_projects(&self) -> ApiResult<Vec<VercelProject>> {
        *self.calls.lock().await += 1;
        match self.error {
            Some(ref error) => Err(error.clone()),
            None => Ok(self.projects.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockGitHubClient::new();

        assert!(mock.list_repos("octocat").await.unwrap().is_empty());
        assert!(mock.get_user("octocat").await.is_err());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_queued_error_is_consumed() {
        let mock = MockGitHubClient::new()
            .with_pinned(&["site"])
            .with_error("pinned_repo_names", ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.pinned_repo_names("octocat").await.is_err());
        assert_eq!(mock.pinned_repo_names("octocat").await.unwrap(), vec!["site"]);
        assert_eq!(mock.call_counts().await.pinned_repo_names, 2);
    }

    #[tokio::test]
    async fn test_mock_event_pages_link() {
        let mock = MockGitHubClient::new().with_event_pages(vec![
            vec![Event::default(), Event::default()],
            vec![Event::default()],
        ]);

        let first = mock.events_page("octocat", 1).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_next);

        let second = mock.events_page("octocat", 2).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_next);

        let requests = mock.captured_requests().await;
        assert_eq!(requests[1].target, "octocat/2");
    }

    #[tokio::test]
    async fn test_mock_vercel_counts_calls() {
        let mock = MockVercelClient::new().with_projects(vec![VercelProject {
            name: "site".to_string(),
            ..Default::default()
        }]);

        assert_eq!(mock.list_projects().await.unwrap().len(), 1);
        assert_eq!(mock.calls().await, 1);
    }
}
