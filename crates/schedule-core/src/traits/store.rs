//! Credential store trait.

use std::fmt;

use crate::tokens::{AccessToken, CredentialPair, RefreshToken};
use crate::Result;

/// A named slot in a credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    AccessToken,
    RefreshToken,
    UserRole,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::AccessToken, Slot::RefreshToken, Slot::UserRole];

    /// Key under which the slot is persisted.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::AccessToken => "accessToken",
            Slot::RefreshToken => "refreshToken",
            Slot::UserRole => "userRole",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Durable key-value storage for credentials, surviving process restarts.
///
/// Implementations hold no logic of their own.
pub trait CredentialStore: Send + Sync {
    /// Read a slot.
    fn get(&self, slot: Slot) -> Result<Option<String>>;

    /// Write a slot.
    fn set(&self, slot: Slot, value: &str) -> Result<()>;

    /// Remove a slot. Removing an empty slot is not an error.
    fn remove(&self, slot: Slot) -> Result<()>;

    /// Remove every slot.
    fn clear(&self) -> Result<()> {
        for slot in Slot::ALL {
            self.remove(slot)?;
        }
        Ok(())
    }

    /// Read the credential pair.
    fn load_pair(&self) -> Result<CredentialPair> {
        Ok(CredentialPair {
            access: self.get(Slot::AccessToken)?.map(AccessToken::new),
            refresh: self.get(Slot::RefreshToken)?.map(RefreshToken::new),
        })
    }

    /// Persist the present halves of a credential pair; absent halves are
    /// left untouched.
    fn save_pair(&self, pair: &CredentialPair) -> Result<()> {
        if let Some(access) = &pair.access {
            self.set(Slot::AccessToken, access.as_str())?;
        }
        if let Some(refresh) = &pair.refresh {
            self.set(Slot::RefreshToken, refresh.as_str())?;
        }
        Ok(())
    }
}
