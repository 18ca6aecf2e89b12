//! User profile and social account models

use serde::{Deserialize, Serialize};

/// GitHub user profile (`GET /users/{username}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Login handle
    #[serde(default)]
    pub login: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Profile bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// Personal website; GitHub sends an empty string when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Public email, only present when the user made it visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub followers: u64,

    #[serde(default)]
    pub following: u64,

    #[serde(default)]
    pub public_repos: u64,
}

impl User {
    /// Name to show, falling back to the login
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }

    /// Website, if one is set
    pub fn website(&self) -> Option<&str> {
        self.blog.as_deref().filter(|b| !b.is_empty())
    }
}

/// Linked social account (`GET /users/{username}/social_accounts`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialAccount {
    /// Provider name (linkedin, twitter, generic, ...)
    #[serde(default)]
    pub provider: String,

    /// Profile URL
    #[serde(default)]
    pub url: String,
}

impl SocialAccount {
    /// Last path segment of the profile URL
    pub fn handle(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.url)
    }

    /// Host part of the profile URL
    pub fn host(&self) -> Option<&str> {
        self.url.split('/').nth(2).filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_tolerates_nulls() {
        let json = r#"{
            "login": "octocat",
            "name": null,
            "bio": null,
            "blog": "",
            "followers": 42,
            "public_repos": 8
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.display_name(), "octocat");
        assert_eq!(user.website(), None);
        assert_eq!(user.followers, 42);
        assert_eq!(user.following, 0);
    }

    #[test]
    fn test_social_account_handle() {
        let account = SocialAccount {
            provider: "linkedin".to_string(),
            url: "https://www.linkedin.com/in/octocat/".to_string(),
        };
        assert_eq!(account.handle(), "octocat");
        assert_eq!(account.host(), Some("www.linkedin.com"));
    }
}
