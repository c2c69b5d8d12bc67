//! schedule-core - Core types and traits for the university schedule API.

pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod memory;
pub mod message;
pub mod models;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use endpoints::{FreeRoomsQuery, LessonFilter, Resource, RoomType};
pub use error::Error;
pub use memory::MemoryCredentialStore;
pub use models::{CurrentUser, Role};
pub use tokens::{AccessToken, CredentialPair, RefreshToken};
pub use traits::{Api, CredentialStore, NoopListener, SessionListener, Slot};
pub use types::{ApiUrl, Method, RequestDescriptor};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
