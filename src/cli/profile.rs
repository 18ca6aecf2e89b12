//! Profile command implementation

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::profile_fields;
use crate::output::{self, Report};

/// Show the profile header for the resolved user
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!("Fetching profile for {}", ctx.username);

    let profile = ctx.gateway.profile(&ctx.username).await;
    let report = Report::new(&profile, profile_fields(&profile));
    output::print(&report, ctx.format, Some(ctx.gateway.cache_stats()))
}
