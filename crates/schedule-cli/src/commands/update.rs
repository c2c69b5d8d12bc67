//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Resource};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Resource collection, e.g. rooms
    pub resource: Resource,

    /// Item id
    pub id: u64,

    /// Full item as JSON, or @file
    #[arg(long)]
    pub data: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: UpdateArgs, target: &Target) -> Result<()> {
    let body = super::parse_data(&args.data)?;
    let client = session::open(target)?;

    let updated = client
        .update(args.resource, args.id, &body)
        .await
        .with_context(|| format!("Failed to update {} {}", args.resource, args.id))?;

    output::success("Updated");
    output::body(&updated, args.pretty)
}
