//! Composite views: project showcase, profile, contacts and repository insights

use std::cmp::Reverse;

use serde::Serialize;

use super::Gateway;
use super::activity::ActivitySummary;
use super::frameworks::FrameworkStatus;
use crate::client::parallel::{DEFAULT_CONCURRENCY, fan_out};
use crate::client::{
    AlertSeverityCounts, GitHubApi, Organization, Repository, RouterUsage, SocialAccount,
    TrafficSummary, User, VercelApi, VercelProject,
};

/// Repository prepared for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    #[serde(flatten)]
    pub repository: Repository,

    /// Vercel project deployed from this repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel: Option<VercelProject>,

    pub pinned: bool,

    /// Only filled by [`Gateway::showcase_with_frameworks`]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<FrameworkStatus>,
}

impl Project {
    fn owner_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let login = self.repository.owner.login.as_str();
        if login.is_empty() { fallback } else { login }
    }
}

/// Projects split into pinned highlights and everything else
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Showcase {
    pub featured: Vec<Project>,
    pub others: Vec<Project>,
}

impl Showcase {
    pub fn len(&self) -> usize {
        self.featured.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the showcase from already fetched data.
///
/// Featured projects are the pinned ones by stars. The rest excludes private,
/// forked, archived, pinned and blacklisted repositories and is ordered by
/// last update, repositories without a timestamp first.
pub fn build_showcase(
    repositories: Vec<Repository>,
    pinned: &[String],
    vercel: &[VercelProject],
    blacklist: &[String],
) -> Showcase {
    let mut featured = Vec::new();
    let mut others = Vec::new();

    for repository in repositories {
        let is_pinned = pinned.contains(&repository.name);
        let listed = !repository.private
            && !repository.fork
            && !repository.archived
            && !is_pinned
            && !blacklist.contains(&repository.name);

        let project = Project {
            vercel: vercel.iter().find(|p| p.name == repository.name).cloned(),
            pinned: is_pinned,
            frameworks: Vec::new(),
            repository,
        };

        if is_pinned {
            featured.push(project);
        } else if listed {
            others.push(project);
        }
    }

    featured.sort_by_key(|p| Reverse(p.repository.stargazers_count));
    // None sorts before Some: undated repositories lead, then newest first
    others.sort_by_key(|p| p.repository.updated_at.map(Reverse));

    Showcase { featured, others }
}

/// Profile header data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Profile {
    pub user: User,
    pub organizations: Vec<Organization>,
    pub activity: ActivitySummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Pull requests merged by the Copilot agent across the account
    pub copilot_merged_prs: u64,
}

/// One way to reach the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub label: String,
    pub href: String,
    pub handle: String,
}

impl Contact {
    fn email(address: &str) -> Self {
        Self {
            label: "Email".to_string(),
            href: format!("mailto:{}", address),
            handle: address.to_string(),
        }
    }

    fn github(username: &str) -> Self {
        Self {
            label: "GitHub".to_string(),
            href: format!("https://github.com/{}", username),
            handle: username.to_string(),
        }
    }

    fn social(account: &SocialAccount) -> Self {
        let label = match account.provider.as_str() {
            "linkedin" | "twitter" => account.provider.clone(),
            _ => account
                .host()
                .map(str::to_string)
                .unwrap_or_else(|| account.provider.clone()),
        };
        Self {
            label,
            href: account.url.clone(),
            handle: account.handle().to_string(),
        }
    }
}

/// Everything known about one repository
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepoInsights {
    pub owner: String,
    pub name: String,
    pub frameworks: Vec<FrameworkStatus>,
    pub traffic: TrafficSummary,
    pub alerts: AlertSeverityCounts,
    pub router: RouterUsage,
    pub router_label: String,
    pub turbopack: bool,
    pub copilot_merged_prs: u64,
}

impl<G: GitHubApi, V: VercelApi> Gateway<G, V> {
    /// Repositories, pinned names and Vercel projects joined into a showcase
    pub async fn showcase(&self, username: &str) -> Showcase {
        let (repositories, pinned, vercel) = tokio::join!(
            self.repos(username),
            self.pinned_repos(username),
            self.vercel_projects(),
        );

        build_showcase(repositories, &pinned, &vercel, &self.settings.blacklist)
    }

    /// [`Self::showcase`] with framework status resolved for every project
    pub async fn showcase_with_frameworks(&self, username: &str) -> Showcase {
        let showcase = self.showcase(username).await;
        let featured_len = showcase.featured.len();
        let projects: Vec<Project> = showcase
            .featured
            .into_iter()
            .chain(showcase.others)
            .collect();

        let mut projects = fan_out(
            projects,
            |mut project: Project| async move {
                project.frameworks = self
                    .repository_frameworks(project.owner_or(username), &project.repository.name)
                    .await;
                project
            },
            DEFAULT_CONCURRENCY,
        )
        .await;

        let others = projects.split_off(featured_len);
        Showcase {
            featured: projects,
            others,
        }
    }

    pub async fn profile(&self, username: &str) -> Profile {
        let (user, organizations, activity, copilot_merged_prs) = tokio::join!(
            self.user(username),
            self.organizations(username),
            self.activity_summary(username),
            self.copilot_prs_account_wide(username),
        );

        Profile {
            headline: activity.headline(),
            user,
            organizations,
            activity,
            copilot_merged_prs,
        }
    }

    /// Email, GitHub and linked social accounts
    pub async fn contacts(&self, username: &str) -> Vec<Contact> {
        let (user, socials) = tokio::join!(self.user(username), self.social_accounts(username));

        let email = user
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(self.settings.fallback_email.as_deref());

        let mut contacts = Vec::with_capacity(socials.len() + 2);
        if let Some(email) = email {
            contacts.push(Contact::email(email));
        }
        contacts.push(Contact::github(username));
        contacts.extend(socials.iter().map(Contact::social));
        contacts
    }

    pub async fn repo_insights(&self, owner: &str, name: &str) -> RepoInsights {
        let (frameworks, traffic, alerts, router, copilot_merged_prs, turbopack) = tokio::join!(
            self.repository_frameworks(owner, name),
            self.traffic(owner, name),
            self.dependabot_alerts(owner, name),
            self.router_usage(owner, name),
            self.copilot_prs(owner, name),
            self.uses_turbopack(owner, name),
        );

        RepoInsights {
            owner: owner.to_string(),
            name: name.to_string(),
            frameworks,
            traffic,
            alerts,
            router_label: router.label().to_string(),
            router,
            turbopack,
            copilot_merged_prs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockGitHubClient, MockVercelClient, RepoOwner};
    use crate::gateway::GatewaySettings;
    use crate::gateway::tests::{event, gateway_with, octocat, start_time};
    use chrono::Duration as ChronoDuration;

    fn repo(name: &str, stars: u64, updated_days_ago: Option<i64>) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            owner: RepoOwner {
                login: "octocat".to_string(),
            },
            stargazers_count: stars,
            updated_at: updated_days_ago.map(|d| start_time() - ChronoDuration::days(d)),
            ..Default::default()
        }
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.repository.name.as_str()).collect()
    }

    fn vercel_project(name: &str) -> VercelProject {
        VercelProject {
            name: name.to_string(),
            framework: Some("nextjs".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_showcase_filters_and_orders() {
        let repositories = vec![
            repo("old", 1, Some(30)),
            Repository {
                fork: true,
                ..repo("forked", 0, Some(1))
            },
            Repository {
                archived: true,
                ..repo("archived", 0, Some(1))
            },
            Repository {
                private: true,
                ..repo("secret", 0, Some(1))
            },
            repo("recent", 2, Some(2)),
            repo("undated", 0, None),
            repo("hidden", 0, Some(1)),
            repo("portfolio", 5, Some(3)),
            repo("cli", 40, Some(90)),
        ];
        let pinned = vec!["portfolio".to_string(), "cli".to_string()];
        let blacklist = vec!["hidden".to_string()];

        let showcase = build_showcase(repositories, &pinned, &[], &blacklist);

        assert_eq!(names(&showcase.featured), vec!["cli", "portfolio"]);
        assert!(showcase.featured.iter().all(|p| p.pinned));
        assert_eq!(names(&showcase.others), vec!["undated", "recent", "old"]);
        assert_eq!(showcase.len(), 5);
    }

    #[test]
    fn test_build_showcase_attaches_vercel_by_name() {
        let showcase = build_showcase(
            vec![repo("portfolio", 0, Some(1)), repo("dotfiles", 0, Some(2))],
            &[],
            &[vercel_project("portfolio"), vercel_project("unrelated")],
            &[],
        );

        assert_eq!(
            showcase.others[0].vercel.as_ref().map(|v| v.name.as_str()),
            Some("portfolio")
        );
        assert!(showcase.others[1].vercel.is_none());
    }

    #[test]
    fn test_project_serializes_flat() {
        let project = Project {
            repository: repo("portfolio", 3, None),
            ..Default::default()
        };
        let json = serde_json::to_value(&project).unwrap();

        assert_eq!(json["name"], "portfolio");
        assert_eq!(json["stargazers_count"], 3);
        assert!(json.get("frameworks").is_none());
    }

    #[tokio::test]
    async fn test_showcase_joins_sources() {
        let github = MockGitHubClient::new()
            .with_repos(vec![repo("portfolio", 9, Some(1)), repo("notes", 0, Some(5))])
            .with_pinned(&["portfolio"]);
        let vercel = MockVercelClient::new().with_projects(vec![vercel_project("portfolio")]);
        let (gateway, _clock) = gateway_with(github, Some(vercel));

        let showcase = gateway.showcase("octocat").await;

        assert_eq!(names(&showcase.featured), vec!["portfolio"]);
        assert!(showcase.featured[0].vercel.is_some());
        assert_eq!(names(&showcase.others), vec!["notes"]);
    }

    #[tokio::test]
    async fn test_showcase_uses_configured_blacklist() {
        let github = MockGitHubClient::new()
            .with_repos(vec![repo("octocat", 0, Some(1)), repo("notes", 0, Some(5))]);
        let (gateway, _clock) = gateway_with(github, None);
        let gateway = gateway.with_settings(GatewaySettings {
            blacklist: vec!["octocat".to_string()],
            ..Default::default()
        });

        assert_eq!(names(&gateway.showcase("octocat").await.others), vec!["notes"]);
    }

    #[tokio::test]
    async fn test_showcase_survives_failed_sources() {
        let github = MockGitHubClient::new()
            .with_repos(vec![repo("notes", 0, Some(5))])
            .failing(
                "pinned_repo_names",
                crate::error::ApiError::ServerError("502".to_string()),
            );
        let vercel =
            MockVercelClient::new().failing(crate::error::ApiError::Unauthorized);
        let (gateway, _clock) = gateway_with(github, Some(vercel));

        let showcase = gateway.showcase("octocat").await;
        assert!(showcase.featured.is_empty());
        assert_eq!(names(&showcase.others), vec!["notes"]);
    }

    #[tokio::test]
    async fn test_showcase_with_frameworks_keeps_order() {
        let manifest = serde_json::from_str(r#"{ "dependencies": { "astro": "^4.0.0" } }"#).unwrap();
        let github = MockGitHubClient::new()
            .with_repos(vec![
                repo("blog", 0, Some(1)),
                repo("notes", 0, Some(3)),
                repo("portfolio", 1, Some(9)),
            ])
            .with_pinned(&["portfolio"])
            .with_manifest("octocat", "blog", manifest)
            .with_release("withastro", "astro", "5.1.0");
        let (gateway, _clock) = gateway_with(github, None);

        let showcase = gateway.showcase_with_frameworks("octocat").await;

        assert_eq!(names(&showcase.featured), vec!["portfolio"]);
        assert_eq!(names(&showcase.others), vec!["blog", "notes"]);
        assert_eq!(showcase.others[0].frameworks.len(), 1);
        assert!(showcase.others[0].frameworks[0].has_upgrade);
        assert!(showcase.others[1].frameworks.is_empty());
        assert_eq!(gateway.github().call_counts().await.package_manifest, 3);
    }

    #[tokio::test]
    async fn test_profile() {
        let github = MockGitHubClient::new()
            .with_user(octocat())
            .with_event_pages(vec![vec![event("PullRequestReviewEvent"); 2]])
            .with_search_count(
                "is:pr is:merged author:copilot-swe-agent[bot] involves:octocat",
                4,
            );
        let (gateway, _clock) = gateway_with(github, None);

        let profile = gateway.profile("octocat").await;

        assert_eq!(profile.user.display_name(), "The Octocat");
        assert_eq!(profile.activity.reviews, 2);
        assert_eq!(
            profile.headline.as_deref(),
            Some("In the last 90 days on GitHub I reviewed 2 PRs in public repositories.")
        );
        assert_eq!(profile.copilot_merged_prs, 4);
        assert!(profile.organizations.is_empty());
    }

    #[tokio::test]
    async fn test_contacts() {
        let github = MockGitHubClient::new()
            .with_user(User {
                email: Some("octocat@github.com".to_string()),
                ..octocat()
            })
            .with_social_accounts(vec![
                SocialAccount {
                    provider: "linkedin".to_string(),
                    url: "https://www.linkedin.com/in/octocat".to_string(),
                },
                SocialAccount {
                    provider: "generic".to_string(),
                    url: "https://mastodon.social/@octocat".to_string(),
                },
            ]);
        let (gateway, _clock) = gateway_with(github, None);

        let contacts = gateway.contacts("octocat").await;

        assert_eq!(contacts.len(), 4);
        assert_eq!(contacts[0].href, "mailto:octocat@github.com");
        assert_eq!(contacts[1].href, "https://github.com/octocat");
        assert_eq!(contacts[2].label, "linkedin");
        assert_eq!(contacts[2].handle, "octocat");
        assert_eq!(contacts[3].label, "mastodon.social");
        assert_eq!(contacts[3].handle, "@octocat");
    }

    #[tokio::test]
    async fn test_contacts_fallback_email() {
        let (gateway, _clock) = gateway_with(MockGitHubClient::new().with_user(octocat()), None);
        let gateway = gateway.with_settings(GatewaySettings {
            fallback_email: Some("hello@example.com".to_string()),
            ..Default::default()
        });

        let contacts = gateway.contacts("octocat").await;
        assert_eq!(contacts[0].handle, "hello@example.com");
        assert_eq!(contacts.len(), 2);
    }

    #[tokio::test]
    async fn test_contacts_without_email() {
        let (gateway, _clock) = gateway_with(MockGitHubClient::new(), None);

        let contacts = gateway.contacts("octocat").await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].label, "GitHub");
    }

    #[tokio::test]
    async fn test_repo_insights() {
        let manifest = serde_json::from_str(
            r#"{
                "dependencies": { "next": "^14.2.3" },
                "scripts": { "dev": "next dev --turbo" }
            }"#,
        )
        .unwrap();
        let github = MockGitHubClient::new()
            .with_manifest("octocat", "site", manifest)
            .with_release("vercel", "next.js", "v15.0.0")
            .with_path("octocat", "site", "app/layout.tsx")
            .with_search_count(
                "is:pr is:merged author:copilot-swe-agent[bot] involves:octocat repo:octocat/site",
                1,
            );
        let (gateway, _clock) = gateway_with(github, None);

        let insights = gateway.repo_insights("octocat", "site").await;

        assert_eq!(insights.frameworks.len(), 1);
        assert!(insights.frameworks[0].has_upgrade);
        assert!(insights.turbopack);
        assert!(insights.router.app_router);
        assert_eq!(insights.router_label, "Next.js project using App Router");
        assert_eq!(insights.copilot_merged_prs, 1);
        assert!(insights.alerts.is_empty());

        // Frameworks and Turbopack detection share one manifest fetch
        assert_eq!(gateway.github().call_counts().await.package_manifest, 1);
    }
}
