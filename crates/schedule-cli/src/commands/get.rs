//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Resource};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource collection, e.g. rooms
    pub resource: Resource,

    /// Item id
    pub id: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, target: &Target) -> Result<()> {
    let client = session::open(target)?;

    let item = client
        .get(args.resource, args.id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", args.resource, args.id))?;

    output::body(&item, args.pretty)
}
