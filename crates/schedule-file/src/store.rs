//! Filesystem storage for credentials.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use schedule_core::Result;
use schedule_core::error::{Error, StoreError};
use schedule_core::traits::{CredentialStore, Slot};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(err: std::io::Error) -> Error {
    Error::Store(StoreError::Io {
        message: err.to_string(),
    })
}

/// A [`CredentialStore`] backed by a single JSON file.
///
/// The file holds a flat object mapping slot keys to values. Every write
/// takes an exclusive advisory lock on a sibling `.lock` file, writes a
/// temporary file and renames it over the original, so readers never see a
/// partial document. On Unix the file is created with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store persisting to `path`. Nothing is touched until first use.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at `credentials.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join("credentials.json"))
    }

    /// Get the credentials file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<File> {
        self.ensure_parent()?;
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(map_io)?;
        lock.lock_exclusive().map_err(map_io)?;
        Ok(lock)
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let json = fs::read_to_string(&self.path).map_err(map_io)?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&json).map_err(|e| {
            StoreError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(map).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;

        let temp = self.temp_path();
        {
            let mut file = File::create(&temp).map_err(map_io)?;

            // Set restrictive permissions (Unix only)
            #[cfg(unix)]
            {
                let mut perms = file.metadata().map_err(map_io)?.permissions();
                perms.set_mode(0o600);
                file.set_permissions(perms).map_err(map_io)?;
            }

            file.write_all(json.as_bytes()).map_err(map_io)?;
            file.sync_all().map_err(map_io)?;
        }

        fs::rename(&temp, &self.path).map_err(map_io)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let lock = self.lock()?;
        let mut map = self.read_map()?;
        apply(&mut map);
        self.write_map(&map)?;

        FileExt::unlock(&lock).map_err(map_io)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, slot: Slot) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map
            .get(slot.key())
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, slot: Slot, value: &str) -> Result<()> {
        debug!(%slot, "Writing credential slot");
        self.update(|map| {
            map.insert(slot.key().to_string(), Value::String(value.to_string()));
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, slot: Slot) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        debug!(%slot, "Removing credential slot");
        self.update(|map| {
            map.remove(slot.key());
        })
    }
}
