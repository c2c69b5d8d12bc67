//! Refresh token command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, target: &Target) -> Result<()> {
    let client = session::open_authenticated(target).await?;

    output::progress("Refreshing access token...");

    if !client.refresh_access_token().await {
        anyhow::bail!("Failed to refresh access token. Run 'schedule login' again.");
    }

    output::success("Access token refreshed");
    Ok(())
}
