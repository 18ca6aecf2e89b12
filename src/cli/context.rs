//! Command execution context
//!
//! Loads configuration, resolves the username and wires the GitHub and
//! Vercel clients into a gateway, so handlers only deal with gateway calls.

use std::sync::Arc;

use log::debug;

use crate::cache::SystemClock;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{ClientOptions, GitHubClient, RateLimiterSet, VercelClient};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{Gateway, GatewaySettings};

/// Gateway over the real HTTP clients
pub type LiveGateway = Gateway<GitHubClient, VercelClient>;

/// Context for command execution containing config, gateway and runtime options.
pub struct CommandContext {
    /// Loaded configuration with the environment applied
    pub config: Config,
    /// GitHub username the command is about
    pub username: String,
    pub gateway: LiveGateway,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, no username can be resolved
    /// or an HTTP client cannot be built.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        let username = config.resolve_username(opts.user_ref())?;
        let gateway = build_gateway(&config)?;

        debug!("Context ready for {}", username);

        Ok(Self {
            config,
            username,
            gateway,
            format: opts.format,
        })
    }
}

/// Build a gateway for `config`; Vercel stays disabled without a token.
pub fn build_gateway(config: &Config) -> Result<LiveGateway> {
    let rate_limiters = Arc::new(RateLimiterSet::new());

    let github = GitHubClient::new(ClientOptions::github(config, rate_limiters.clone()))?;
    let vercel = ClientOptions::vercel(config, rate_limiters)
        .map(VercelClient::new)
        .transpose()?;

    let settings = GatewaySettings {
        blacklist: config.projects.blacklist.clone(),
        fallback_email: config.email.clone(),
    };

    Ok(Gateway::new(github, vercel, Arc::new(SystemClock)).with_settings(settings))
}
