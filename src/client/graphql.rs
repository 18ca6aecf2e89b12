//! GitHub GraphQL queries and response envelope
//!
//! Every query is parameterized; user input only travels in `variables`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const PINNED_REPOS: &str = r#"
query PinnedRepos($login: String!) {
  user(login: $login) {
    pinnedItems(first: 6, types: REPOSITORY) {
      nodes { ... on Repository { name } }
    }
  }
}"#;

pub const ORGANIZATIONS: &str = r#"
query Organizations($login: String!) {
  user(login: $login) {
    organizations(first: 6) {
      nodes { login name websiteUrl url avatarUrl description }
    }
  }
}"#;

pub const PACKAGE_MANIFEST: &str = r#"
query PackageManifest($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    object(expression: "HEAD:package.json") {
      ... on Blob { text }
    }
  }
}"#;

pub const LATEST_RELEASE: &str = r#"
query LatestRelease($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    latestRelease { tagName updatedAt }
  }
}"#;

pub const SEARCH_COUNT: &str = r#"
query SearchCount($q: String!) {
  search(type: ISSUE, query: $q, first: 1) {
    issueCount
  }
}"#;

/// Request body
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Map<String, Value>,
}

impl<'a> GraphQlRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            variables: Map::new(),
        }
    }

    pub fn var(mut self, name: &str, value: &str) -> Self {
        self.variables
            .insert(name.to_string(), Value::String(value.to_string()));
        self
    }
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// `data`, or the reported errors joined into one [`ApiError::GraphQl`]
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| ApiError::InvalidResponse("GraphQL response without data".to_string()))
    }
}

// Response shapes. `user` and `repository` come back null for unknown logins.

#[derive(Debug, Deserialize)]
pub struct UserData<T> {
    pub user: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData<T> {
    pub repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedItems {
    pub pinned_items: Nodes<NamedNode>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationNodes {
    pub organizations: Nodes<crate::client::models::Organization>,
}

#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
pub struct NamedNode {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestObject {
    pub object: Option<BlobText>,
}

#[derive(Debug, Deserialize)]
pub struct BlobText {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReleaseData {
    pub latest_release: Option<RawRelease>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelease {
    pub tag_name: String,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCount {
    #[serde(default)]
    pub issue_count: u64,
}
