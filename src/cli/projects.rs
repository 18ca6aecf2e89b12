//! Projects command implementation

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::ProjectDisplay;
use crate::output::{self, Report};

/// List pinned projects first, then the rest by last update
pub async fn run(opts: &GlobalOptions, with_frameworks: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!(
        "Fetching projects for {} (frameworks: {})",
        ctx.username, with_frameworks
    );

    let showcase = if with_frameworks {
        ctx.gateway.showcase_with_frameworks(&ctx.username).await
    } else {
        ctx.gateway.showcase(&ctx.username).await
    };
    debug!(
        "{} featured, {} other projects",
        showcase.featured.len(),
        showcase.others.len()
    );

    let rows: Vec<ProjectDisplay> = showcase
        .featured
        .iter()
        .chain(&showcase.others)
        .map(ProjectDisplay::from)
        .collect();

    let report = Report::new(&showcase, rows);
    output::print(&report, ctx.format, Some(ctx.gateway.cache_stats()))
}
