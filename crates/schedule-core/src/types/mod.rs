//! Core value types.
//!
//! These types enforce their invariants at construction time.

mod api_url;
mod request;

pub use api_url::ApiUrl;
pub use request::{Method, RequestDescriptor};
