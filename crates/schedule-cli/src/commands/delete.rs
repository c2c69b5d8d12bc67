//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::{Api, Resource};

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource collection, e.g. rooms
    pub resource: Resource,

    /// Item id
    pub id: u64,
}

pub async fn run(args: DeleteArgs, target: &Target) -> Result<()> {
    let client = session::open(target)?;

    client
        .delete(args.resource, args.id)
        .await
        .with_context(|| format!("Failed to delete {} {}", args.resource, args.id))?;

    output::success(&format!("Deleted {} {}", args.resource, args.id));
    Ok(())
}
