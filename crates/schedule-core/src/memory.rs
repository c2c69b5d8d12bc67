//! In-memory credential store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::traits::{CredentialStore, Slot};
use crate::Result;

/// A [`CredentialStore`] that lives only as long as the process.
///
/// Useful for tests and for one-shot sessions that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: RwLock<HashMap<Slot, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a token pair.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(Slot::AccessToken, access.into());
        slots.insert(Slot::RefreshToken, refresh.into());
        Self {
            slots: RwLock::new(slots),
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Io {
        message: "memory store lock poisoned".to_string(),
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, slot: Slot) -> Result<Option<String>> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(&slot).cloned())
    }

    fn set(&self, slot: Slot, value: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.remove(&slot);
        Ok(())
    }
}
