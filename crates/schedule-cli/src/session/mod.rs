//! Client construction for commands.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use schedule_core::{ApiUrl, SessionListener};
use schedule_http::{ApiClient, ClientConfig};

use crate::cli::Target;
use crate::output;

/// Tells the user to log in again once the backend rejects the session.
#[derive(Debug, Default)]
pub struct CliListener;

impl SessionListener for CliListener {
    fn session_expired(&self) {
        output::error("Session expired. Run 'schedule login' again.");
    }
}

/// Build a client for `target`, restoring stored credentials.
pub fn open(target: &Target) -> Result<ApiClient> {
    let api = ApiUrl::new(&target.api).context("Invalid API URL")?;
    let mut config = ClientConfig::new(api);
    if let Some(secs) = target.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let store = storage::credential_store(target)?;
    ApiClient::with_listener(config, Arc::new(store), Arc::new(CliListener))
        .context("Failed to create API client")
}

/// Like [`open`], but fails early when nothing is stored.
pub async fn open_authenticated(target: &Target) -> Result<ApiClient> {
    let client = open(target)?;
    if !client.is_authenticated().await {
        anyhow::bail!("Not logged in. Run 'schedule login' first.");
    }
    Ok(client)
}
