//! Repo command implementation

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::{FrameworkDisplay, insight_fields};
use crate::output::{self, Report};
use crate::output::table::format_table;

/// Show insights for one repository.
///
/// `owner` defaults to the resolved username.
pub async fn run(opts: &GlobalOptions, name: &str, owner: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let owner = owner.unwrap_or(ctx.username.as_str());
    debug!("Fetching insights for {}/{}", owner, name);

    let insights = ctx.gateway.repo_insights(owner, name).await;

    let report = Report::new(&insights, insight_fields(&insights));
    output::print(&report, ctx.format, Some(ctx.gateway.cache_stats()))?;

    if ctx.format == OutputFormat::Table && !insights.frameworks.is_empty() {
        let rows: Vec<FrameworkDisplay> =
            insights.frameworks.iter().map(FrameworkDisplay::from).collect();
        println!("\n{}", format_table(&rows));
    }

    Ok(())
}
