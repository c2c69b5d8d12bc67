//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Resource};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Resource collection, e.g. rooms
    pub resource: Resource,

    /// Item fields as JSON, or @file
    #[arg(long)]
    pub data: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: CreateArgs, target: &Target) -> Result<()> {
    let body = super::parse_data(&args.data)?;
    let client = session::open(target)?;

    let created = client
        .create(args.resource, &body)
        .await
        .with_context(|| format!("Failed to create {} item", args.resource))?;

    output::success("Created");
    output::body(&created, args.pretty)
}
