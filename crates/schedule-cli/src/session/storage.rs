//! Location of the persisted credentials.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use schedule_file::FileCredentialStore;

use crate::cli::Target;

/// Resolve the data directory, creating it if needed.
pub fn data_dir(target: &Target) -> Result<PathBuf> {
    let dir = match &target.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("", "", "schedule")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    Ok(dir)
}

/// The credential store inside the data directory.
pub fn credential_store(target: &Target) -> Result<FileCredentialStore> {
    let store = FileCredentialStore::in_dir(data_dir(target)?);
    tracing::debug!(path = %store.path().display(), "Using credential store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_is_created() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = Target {
            api: crate::cli::DEFAULT_API_URL.to_string(),
            data_dir: Some(temp.path().join("nested").join("schedule")),
            timeout: None,
        };

        let store = credential_store(&target).unwrap();

        assert!(temp.path().join("nested/schedule").is_dir());
        assert_eq!(
            store.path(),
            temp.path().join("nested/schedule/credentials.json")
        );
    }
}
