//! Framework detection and upgrade checks

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::Gateway;
use crate::client::{GitHubApi, PackageManifest, Release, VercelApi};

/// A web framework recognised in `package.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framework {
    /// npm package that marks the framework
    pub dependency: &'static str,
    pub name: &'static str,
    /// Short identifier, e.g. `nextjs`
    pub kind: &'static str,
    /// GitHub repository publishing its releases
    pub owner: &'static str,
    pub repo: &'static str,
}

pub const FRAMEWORKS: [Framework; 6] = [
    Framework {
        dependency: "next",
        name: "Next.js",
        kind: "nextjs",
        owner: "vercel",
        repo: "next.js",
    },
    Framework {
        dependency: "astro",
        name: "Astro",
        kind: "astro",
        owner: "withastro",
        repo: "astro",
    },
    Framework {
        dependency: "nuxt",
        name: "Nuxt",
        kind: "nuxt",
        owner: "nuxt",
        repo: "nuxt",
    },
    Framework {
        dependency: "@sveltejs/kit",
        name: "SvelteKit",
        kind: "sveltekit",
        owner: "sveltejs",
        repo: "kit",
    },
    Framework {
        dependency: "@remix-run/react",
        name: "Remix",
        kind: "remix",
        owner: "remix-run",
        repo: "remix",
    },
    Framework {
        dependency: "gatsby",
        name: "Gatsby",
        kind: "gatsby",
        owner: "gatsbyjs",
        repo: "gatsby",
    },
];

/// Framework found in a manifest, with the version it pins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedFramework {
    pub framework: Framework,
    pub version: String,
}

/// Framework usage of a repository compared against upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkStatus {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub dependency: String,

    /// Version from `package.json`, range prefix removed
    pub version: String,

    pub latest_version: Option<String>,

    pub has_upgrade: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_updated_at: Option<DateTime<Utc>>,
}

impl FrameworkStatus {
    fn new(detected: DetectedFramework, latest: Option<Release>) -> Self {
        let has_upgrade = latest.as_ref().is_some_and(|release| {
            !detected.version.is_empty()
                && !release.tag_name.is_empty()
                && compare_versions(&detected.version, &release.tag_name) == Ordering::Less
        });

        Self {
            name: detected.framework.name.to_string(),
            kind: detected.framework.kind.to_string(),
            dependency: detected.framework.dependency.to_string(),
            version: detected.version,
            has_upgrade,
            latest_version: latest.as_ref().map(|r| r.tag_name.clone()),
            latest_updated_at: latest.and_then(|r| r.updated_at),
        }
    }
}

/// Strip range operators (`^`, `~`, `>=`, ...) from a dependency version
pub fn clean_dependency_version(range: &str) -> &str {
    range.trim()
        .trim_start_matches(['^', '~', '>', '=', '<'])
        .trim_start()
}

/// Frameworks used by a manifest, in [`FRAMEWORKS`] order
pub fn detect_frameworks(manifest: &PackageManifest) -> Vec<DetectedFramework> {
    let dependencies = manifest.all_dependencies();

    FRAMEWORKS
        .iter()
        .filter_map(|framework| {
            let range = dependencies.get(framework.dependency)?;
            Some(DetectedFramework {
                framework: *framework,
                version: clean_dependency_version(range).to_string(),
            })
        })
        .collect()
}

/// Compare dotted versions numerically.
///
/// A leading `v` is ignored, each segment counts by its leading digits
/// (anything else is 0) and missing segments are 0, so `1.2` equals `1.2.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = version_segments(a);
    let b = version_segments(b);
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn version_segments(version: &str) -> Vec<u64> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);

    version
        .split('.')
        .map(|segment| {
            let digits_end = segment
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(segment.len());
            segment[..digits_end].parse().unwrap_or(0)
        })
        .collect()
}

impl<G: GitHubApi, V: VercelApi> Gateway<G, V> {
    /// Frameworks used by a repository with their upgrade status.
    ///
    /// Release lookups run concurrently; one that fails only blanks its own
    /// entry's latest version.
    pub async fn repository_frameworks(&self, owner: &str, repo: &str) -> Vec<FrameworkStatus> {
        let Some(manifest) = self.package_manifest(owner, repo).await else {
            return Vec::new();
        };

        let lookups = detect_frameworks(&manifest).into_iter().map(|detected| async move {
            let latest = self
                .latest_release(detected.framework.owner, detected.framework.repo)
                .await;
            FrameworkStatus::new(detected, latest)
        });
        join_all(lookups).await
    }

    /// Whether the repository's dev script runs Turbopack
    pub async fn uses_turbopack(&self, owner: &str, repo: &str) -> bool {
        self.package_manifest(owner, repo)
            .await
            .is_some_and(|manifest| manifest.uses_turbopack())
    }
}
