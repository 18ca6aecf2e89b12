//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence for the username is: `--user` flag > config/environment >
/// template account. This struct captures the CLI/env layer; the rest is
/// resolved in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.folio/config.yaml)
    pub config: Option<String>,

    /// GitHub username override
    pub user: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            user: cli.user.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get username override as `Option<&str>`.
    pub fn user_ref(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "folio",
            "--format",
            "json",
            "--user",
            "octocat",
            "--config",
            "/tmp/folio.yaml",
            "profile",
        ]);
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.user_ref(), Some("octocat"));
        assert_eq!(opts.config_ref(), Some("/tmp/folio.yaml"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["folio", "status"]);
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Table);
        assert!(opts.user_ref().is_none());
    }
}
