//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::Credentials;

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "SCHEDULE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, target: &Target) -> Result<()> {
    let client = session::open(target)?;
    let credentials = Credentials::new(&args.username, &args.password);

    output::progress("Logging in...");

    client.login(credentials).await.context("Failed to login")?;
    let role = client.detect_role().await;

    output::success("Logged in successfully");
    println!();
    output::field("Username", &args.username);
    output::field("Role", role.as_str());
    output::field("API", client.base_url().as_str());

    Ok(())
}
