//! Repository models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository from `GET /users/{username}/repos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    #[serde(default)]
    pub name: String,

    /// `owner/name`
    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub owner: RepoOwner,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deployed site URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(default)]
    pub html_url: String,

    /// Primary language as detected by GitHub
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub watchers_count: u64,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Repository owner reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    #[serde(default)]
    pub login: String,
}

impl Repository {
    /// Homepage, if one is set
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_deserializes_github_shape() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": { "login": "octocat", "id": 1 },
            "description": "My first repo",
            "homepage": "",
            "html_url": "https://github.com/octocat/Hello-World",
            "language": null,
            "stargazers_count": 80,
            "fork": false,
            "archived": true,
            "updated_at": "2011-01-26T19:14:43Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.stargazers_count, 80);
        assert!(repo.archived);
        assert!(!repo.private);
        assert_eq!(repo.homepage(), None);
        assert!(repo.topics.is_empty());
        assert!(repo.updated_at.is_some());
    }
}
