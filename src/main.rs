//! Folio CLI - cached GitHub and Vercel data for portfolio sites

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod gateway;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise warn, or debug with `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_target(debug)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Profile => cli::profile::run(&opts).await,
        Commands::Projects { frameworks } => cli::projects::run(&opts, frameworks).await,
        Commands::Activity => cli::activity::run(&opts).await,
        Commands::Contacts => cli::contacts::run(&opts).await,
        Commands::Repo { name, owner } => cli::repo::run(&opts, &name, owner.as_deref()).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
