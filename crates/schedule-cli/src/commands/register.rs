//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account fields as JSON, or @file
    #[arg(long)]
    pub data: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: RegisterArgs, target: &Target) -> Result<()> {
    let body = super::parse_data(&args.data)?;
    let client = session::open(target)?;

    let account = client
        .register(&body)
        .await
        .context("Failed to register")?;

    output::success("Account registered");
    output::body(&account, args.pretty)
}
