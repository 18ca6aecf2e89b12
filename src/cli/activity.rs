//! Activity command implementation

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::ActivityDisplay;
use crate::output::{self, Report};

/// Summarize the user's recent public events
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let summary = ctx.gateway.activity_summary(&ctx.username).await;

    if ctx.format == OutputFormat::Table {
        match summary.headline() {
            Some(headline) => println!("{}\n", headline),
            None => println!("No recent public activity.\n"),
        }
    }

    let report = Report::new(&summary, ActivityDisplay::rows(&summary));
    output::print(&report, ctx.format, Some(ctx.gateway.cache_stats()))
}
