//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, target: &Target) -> Result<()> {
    let client = session::open(target)?;
    client.logout().await.context("Failed to clear credentials")?;

    output::success("Logged out");
    Ok(())
}
