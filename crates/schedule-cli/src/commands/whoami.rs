//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use schedule_core::Api;

use crate::cli::Target;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, target: &Target) -> Result<()> {
    let client = session::open_authenticated(target).await?;

    let user = client
        .current_user()
        .await
        .context("Failed to fetch current user")?;
    let role = user.role();

    output::field("Username", &user.username);
    if let Some(id) = user.id {
        output::field("ID", &id.to_string());
    }
    output::field("Role", role.as_str());
    output::field(
        "Can edit lessons",
        if role.can_edit_lessons() { "yes" } else { "no" },
    );
    output::field(
        "Can manage users",
        if role.can_manage_users() { "yes" } else { "no" },
    );

    Ok(())
}
