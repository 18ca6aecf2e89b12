//! Contacts command implementation

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::ContactDisplay;
use crate::output::{self, Report};

pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let contacts = ctx.gateway.contacts(&ctx.username).await;

    let rows: Vec<ContactDisplay> = contacts.iter().map(ContactDisplay::from).collect();
    output::print(
        &Report::new(&contacts, rows),
        ctx.format,
        Some(ctx.gateway.cache_stats()),
    )
}
