//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Resource};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource collection, e.g. rooms
    pub resource: Resource,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, target: &Target) -> Result<()> {
    let client = session::open(target)?;

    let items = client
        .list(args.resource)
        .await
        .with_context(|| format!("Failed to list {}", args.resource))?;

    match items.as_array() {
        Some(items) if items.is_empty() => output::progress("No items found."),
        Some(items) => {
            for item in items {
                output::body(item, args.pretty)?;
            }
        }
        None => output::body(&items, args.pretty)?,
    }

    Ok(())
}
