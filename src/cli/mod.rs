//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod activity;
pub mod args;
pub mod contacts;
pub mod context;
pub mod profile;
pub mod projects;
pub mod repo;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// Folio - cached GitHub and Vercel data for portfolio sites
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "FOLIO_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "FOLIO_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FOLIO_DEBUG", hide_env = true)]
    pub debug: bool,

    /// GitHub username to show instead of the configured one
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the profile header: user, organizations and recent activity
    Profile,

    /// List pinned and other public projects
    Projects {
        /// Resolve framework versions for every project
        #[arg(long)]
        frameworks: bool,
    },

    /// Summarize recent public activity
    Activity,

    /// List ways to get in touch
    Contacts,

    /// Show framework, traffic and security insights for one repository
    Repo {
        /// Repository name
        name: String,

        /// Repository owner (defaults to the resolved username)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show token and configuration status
    Status,

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repo_command() {
        let cli = Cli::parse_from(["folio", "repo", "site", "--owner", "vercel"]);
        match cli.command {
            Commands::Repo { name, owner } => {
                assert_eq!(name, "site");
                assert_eq!(owner.as_deref(), Some("vercel"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_projects_frameworks_flag() {
        let cli = Cli::parse_from(["folio", "projects", "--frameworks", "--format", "json"]);
        assert!(matches!(cli.command, Commands::Projects { frameworks: true }));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
