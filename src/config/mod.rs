//! Configuration management for folio
//!
//! Settings come from an optional YAML file, overlaid with environment
//! variables. Tokens are normally supplied through the environment only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Account shown when the site still runs as an unconfigured template.
pub const TEMPLATE_USERNAME: &str = "octocat";

/// Default GitHub REST base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default Vercel REST base URL
pub const DEFAULT_VERCEL_API_URL: &str = "https://api.vercel.com";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Vercel API token; the Vercel integration is disabled without it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel_token: Option<String>,

    /// Default GitHub username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Email shown on the contact list when the GitHub profile has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Template (demo) mode
    #[serde(default)]
    pub is_template: bool,

    /// Override for the GitHub API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_api_url: Option<String>,

    /// Override for the Vercel API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vercel_api_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Project listing preferences
    #[serde(default)]
    pub projects: ProjectsConfig,
}

/// Project listing preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Repository names never shown in the project list
    #[serde(default)]
    pub blacklist: Vec<String>,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            vercel_token: None,
            username: None,
            email: None,
            is_template: false,
            github_api_url: None,
            vercel_api_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            projects: ProjectsConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.folio/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".folio").join("config.yaml"))
    }

    /// Load configuration and apply the process environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(Path::new(p))?,
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Overlay environment variables on top of file values.
    ///
    /// Empty variables are ignored so that `VC_TOKEN=` leaves Vercel disabled.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("GH_TOKEN") {
            self.github_token = Some(token);
        }
        if let Some(token) = var("VC_TOKEN") {
            self.vercel_token = Some(token);
        }
        if let Some(username) = var("GITHUB_USERNAME") {
            self.username = Some(username);
        }
        if let Some(flag) = var("IS_TEMPLATE") {
            self.is_template = !flag.trim().eq_ignore_ascii_case("false");
        }
        if let Some(url) = var("FOLIO_GITHUB_API_URL") {
            self.github_api_url = Some(url);
        }
        if let Some(url) = var("FOLIO_VERCEL_API_URL") {
            self.vercel_api_url = Some(url);
        }
    }

    /// Resolve the GitHub username to render.
    ///
    /// Precedence: explicit override, configured username, template account.
    pub fn resolve_username(&self, user_override: Option<&str>) -> Result<String> {
        if let Some(user) = user_override.filter(|u| !u.is_empty()) {
            return Ok(user.to_string());
        }
        if let Some(ref user) = self.username {
            return Ok(user.clone());
        }
        if self.is_template {
            log::info!(
                "Template mode is on and no username is configured, showing {}",
                TEMPLATE_USERNAME
            );
            return Ok(TEMPLATE_USERNAME.to_string());
        }
        Err(ConfigError::MissingUsername.into())
    }

    /// GitHub API base URL without a trailing slash
    pub fn github_api_url(&self) -> String {
        self.github_api_url
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Vercel API base URL without a trailing slash
    pub fn vercel_api_url(&self) -> String {
        self.vercel_api_url
            .as_deref()
            .unwrap_or(DEFAULT_VERCEL_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
