//! External data gateway
//!
//! Named accessors over the GitHub and Vercel clients. Every accessor is
//! memoized with its own TTL and never fails: upstream errors are logged and
//! replaced by the `Default` of the return type, so callers always get a
//! value of the same shape.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::{CacheStats, CacheTtl, Clock, MemoCache, cache_key};
use crate::client::pagination::{MAX_EVENT_PAGES, fetch_all_pages};
use crate::client::{
    AlertSeverityCounts, ApiResult, Event, GitHubApi, Organization, PackageManifest, Release,
    Repository, RouterUsage, SocialAccount, TrafficSummary, TrafficViews, User, VercelApi,
    VercelProject,
};
use crate::error::ApiError;

pub mod activity;
pub mod frameworks;
pub mod showcase;

pub use activity::ActivitySummary;
pub use frameworks::{FrameworkStatus, compare_versions};
pub use showcase::{Contact, Profile, Project, RepoInsights, Showcase};

/// Login of the Copilot coding agent
const COPILOT_AGENT: &str = "copilot-swe-agent[bot]";

/// Presentation settings that shape composite results
#[derive(Debug, Clone, Default)]
pub struct GatewaySettings {
    /// Repository names never listed among the other projects
    pub blacklist: Vec<String>,

    /// Email shown when the profile has no public email
    pub fallback_email: Option<String>,
}

/// Memoized access to GitHub and Vercel data.
///
/// Owns its cache; build one per process (or per test).
pub struct Gateway<G, V> {
    github: G,
    vercel: Option<V>,
    cache: MemoCache,
    settings: GatewaySettings,
}

impl<G: GitHubApi, V: VercelApi> Gateway<G, V> {
    /// Create a gateway with an empty cache.
    ///
    /// `vercel` is `None` when no Vercel token is configured.
    pub fn new(github: G, vercel: Option<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            github,
            vercel,
            cache: MemoCache::new(clock),
            settings: GatewaySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GatewaySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    #[cfg(test)]
    pub(crate) fn github(&self) -> &G {
        &self.github
    }

    #[cfg(test)]
    pub(crate) fn vercel(&self) -> Option<&V> {
        self.vercel.as_ref()
    }

    /// Run `fetch` through the cache under `accessor(args)`.
    async fn try_memoized<T, F, Fut>(
        &self,
        accessor: &'static str,
        args: &[(&str, &str)],
        ttl: Duration,
        fetch: F,
    ) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let key = cache_key(accessor, args);
        self.cache.get_or_fetch(&key, ttl, fetch).await
    }

    /// [`Self::try_memoized`] with the fallback policy applied
    async fn memoized<T, F, Fut>(
        &self,
        accessor: &'static str,
        args: &[(&str, &str)],
        ttl: Duration,
        fetch: F,
    ) -> T
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let result = self.try_memoized(accessor, args, ttl, fetch).await;
        or_default(accessor, args, result)
    }

    /// Profile of `username`
    pub async fn user(&self, username: &str) -> User {
        self.memoized("user", &[("username", username)], CacheTtl::USER, || {
            self.github.get_user(username)
        })
        .await
    }

    /// Public repositories of `username`
    pub async fn repos(&self, username: &str) -> Vec<Repository> {
        self.memoized("repos", &[("username", username)], CacheTtl::REPOS, || {
            self.github.list_repos(username)
        })
        .await
    }

    /// Social accounts linked on the profile
    pub async fn social_accounts(&self, username: &str) -> Vec<SocialAccount> {
        self.memoized(
            "social_accounts",
            &[("username", username)],
            CacheTtl::SOCIAL_ACCOUNTS,
            || self.github.list_social_accounts(username),
        )
        .await
    }

    /// Names of the pinned repositories
    pub async fn pinned_repos(&self, username: &str) -> Vec<String> {
        self.memoized(
            "pinned_repos",
            &[("username", username)],
            CacheTtl::PINNED_REPOS,
            || self.github.pinned_repo_names(username),
        )
        .await
    }

    /// Organizations the user publicly belongs to
    pub async fn organizations(&self, username: &str) -> Vec<Organization> {
        self.memoized(
            "organizations",
            &[("username", username)],
            CacheTtl::ORGANIZATIONS,
            || self.github.list_organizations(username),
        )
        .await
    }

    /// Vercel projects; empty without a Vercel token
    pub async fn vercel_projects(&self) -> Vec<VercelProject> {
        let Some(ref vercel) = self.vercel else {
            info!("No Vercel token configured, no Vercel projects will be shown");
            return Vec::new();
        };

        self.memoized("vercel_projects", &[], CacheTtl::VERCEL_PROJECTS, || {
            vercel.list_projects()
        })
        .await
    }

    /// `package.json` of a repository, `None` when absent or unreadable
    pub async fn package_manifest(&self, owner: &str, repo: &str) -> Option<PackageManifest> {
        self.memoized(
            "package_manifest",
            &[("owner", owner), ("repo", repo)],
            CacheTtl::PACKAGE_MANIFEST,
            || self.github.package_manifest(owner, repo),
        )
        .await
    }

    /// Latest release of a repository
    pub async fn latest_release(&self, owner: &str, repo: &str) -> Option<Release> {
        self.memoized(
            "latest_release",
            &[("owner", owner), ("repo", repo)],
            CacheTtl::LATEST_RELEASE,
            || self.github.latest_release(owner, repo),
        )
        .await
    }

    /// Every public event of `username`, following pagination.
    ///
    /// A page failure discards the pages already fetched: a partial history
    /// would under-report activity, so nothing is returned and nothing cached.
    pub async fn recent_activity(&self, username: &str) -> Vec<Event> {
        self.memoized(
            "recent_activity",
            &[("username", username)],
            CacheTtl::ACTIVITY,
            || async move {
                fetch_all_pages(MAX_EVENT_PAGES, |page| {
                    self.github.events_page(username, page)
                })
                .await
                .map_err(|failure| {
                    error!(
                        "Events for {} failed on page {}, discarding {} events already fetched: {}",
                        username,
                        failure.failed_page,
                        failure.fetched.len(),
                        failure.error
                    );
                    failure.error
                })
            },
        )
        .await
    }

    /// Folded view of [`Self::recent_activity`]
    pub async fn activity_summary(&self, username: &str) -> ActivitySummary {
        ActivitySummary::from_events(&self.recent_activity(username).await)
    }

    /// Unique visitors of a repository.
    ///
    /// The raw views are cached; "today" is evaluated on every call.
    pub async fn traffic(&self, owner: &str, repo: &str) -> TrafficSummary {
        let args = [("owner", owner), ("repo", repo)];
        let views: ApiResult<TrafficViews> = self
            .try_memoized("traffic", &args, CacheTtl::TRAFFIC, || {
                self.github.traffic_views(owner, repo)
            })
            .await;

        let today = self.cache.now().date_naive();
        or_default("traffic", &args, views.map(|v| v.summarize(today)))
    }

    /// Open Dependabot alerts by severity
    pub async fn dependabot_alerts(&self, owner: &str, repo: &str) -> AlertSeverityCounts {
        self.memoized(
            "dependabot_alerts",
            &[("owner", owner), ("repo", repo)],
            CacheTtl::DEPENDABOT_ALERTS,
            || async move {
                let alerts = self.github.dependabot_alerts(owner, repo).await?;
                Ok(AlertSeverityCounts::from_alerts(&alerts))
            },
        )
        .await
    }

    /// Which Next.js routers a repository uses.
    ///
    /// Probes the `.jsx` entry points first and the `.tsx` variants only for
    /// whichever was not found.
    pub async fn router_usage(&self, owner: &str, repo: &str) -> RouterUsage {
        self.memoized(
            "router_usage",
            &[("owner", owner), ("repo", repo)],
            CacheTtl::ROUTER_LAYOUT,
            || async move {
                let (pages_jsx, app_jsx) = tokio::try_join!(
                    self.github.path_exists(owner, repo, "pages/_app.jsx"),
                    self.github.path_exists(owner, repo, "app/layout.jsx"),
                )?;

                let probe_tsx = |found: bool, path: &'static str| async move {
                    if found {
                        Ok(true)
                    } else {
                        self.github.path_exists(owner, repo, path).await
                    }
                };
                let (pages_router, app_router) = tokio::try_join!(
                    probe_tsx(pages_jsx, "pages/_app.tsx"),
                    probe_tsx(app_jsx, "app/layout.tsx"),
                )?;

                Ok(RouterUsage {
                    pages_router,
                    app_router,
                })
            },
        )
        .await
    }

    /// Merged pull requests authored by the Copilot agent in one repository
    pub async fn copilot_prs(&self, owner: &str, repo: &str) -> u64 {
        let query = format!(
            "is:pr is:merged author:{} involves:{} repo:{}/{}",
            COPILOT_AGENT, owner, owner, repo
        );
        self.memoized(
            "copilot_prs",
            &[("owner", owner), ("repo", repo)],
            CacheTtl::COPILOT_PRS,
            || self.github.search_issue_count(&query),
        )
        .await
    }

    /// Merged pull requests authored by the Copilot agent across the account
    pub async fn copilot_prs_account_wide(&self, username: &str) -> u64 {
        let query = format!(
            "is:pr is:merged author:{} involves:{}",
            COPILOT_AGENT, username
        );
        self.memoized(
            "copilot_prs_account_wide",
            &[("username", username)],
            CacheTtl::COPILOT_PRS,
            || self.github.search_issue_count(&query),
        )
        .await
    }
}

/// Log a failed accessor call and substitute the default value
fn or_default<T: Default>(accessor: &str, args: &[(&str, &str)], result: ApiResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log_failure(accessor, args, &e);
            T::default()
        }
    }
}

fn log_failure(accessor: &str, args: &[(&str, &str)], error: &ApiError) {
    let args = args
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");
    match error {
        ApiError::NotFound(_) => debug!("{}({}) not found, using default: {}", accessor, args, error),
        _ => warn!("{}({}) failed, using default: {}", accessor, args, error),
    }
}
