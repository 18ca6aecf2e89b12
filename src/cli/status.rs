//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Display configuration and token status without calling any API
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Folio Configuration Status".bold());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(err) => {
            println!("{} Configuration could not be loaded: {}", "✗".red(), err);
            println!();
            return Err(err);
        }
    };

    match opts.config_ref() {
        Some(path) => println!("Config file: {}", path.cyan()),
        None => match Config::default_path() {
            Ok(path) if path.exists() => {
                println!("Config file: {}", path.display().to_string().cyan())
            }
            _ => println!("Config file: {}", "none (environment only)".dimmed()),
        },
    }
    println!();

    // GitHub token
    if config.github_token.is_some() {
        println!("{} GitHub token configured", "✓".green());
    } else {
        println!(
            "{} GitHub token not configured (unauthenticated, 60 requests/hour)",
            "⚠".yellow()
        );
        println!("  → Set GH_TOKEN to raise the rate limit");
    }

    // Vercel token
    if config.vercel_token.is_some() {
        println!("{} Vercel token configured", "✓".green());
    } else {
        println!("{} Vercel integration disabled", "○".dimmed());
        println!("  → Set VC_TOKEN to show Vercel deployments");
    }

    // Username
    match config.resolve_username(opts.user_ref()) {
        Ok(username) if config.username.is_none() && opts.user_ref().is_none() => {
            println!(
                "{} Template mode, showing {}",
                "⚠".yellow(),
                username.cyan()
            );
        }
        Ok(username) => println!("{} Username: {}", "✓".green(), username.cyan()),
        Err(_) => {
            println!("{} No username configured", "✗".red());
            println!("  → Set GITHUB_USERNAME or pass --user");
        }
    }

    // Custom API hosts
    if config.github_api_url.is_some() {
        println!(
            "{} Custom GitHub API: {}",
            "○".dimmed(),
            config.github_api_url().cyan()
        );
    }
    if config.vercel_api_url.is_some() {
        println!(
            "{} Custom Vercel API: {}",
            "○".dimmed(),
            config.vercel_api_url().cyan()
        );
    }

    if !config.projects.blacklist.is_empty() {
        println!(
            "{} Hidden projects: {}",
            "○".dimmed(),
            config.projects.blacklist.join(", ").dimmed()
        );
    }

    println!();
    Ok(())
}
