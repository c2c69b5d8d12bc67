//! Core traits for API access, credential storage and session events.

mod api;
mod listener;
mod store;

pub use api::Api;
pub use listener::{NoopListener, SessionListener};
pub use store::{CredentialStore, Slot};
