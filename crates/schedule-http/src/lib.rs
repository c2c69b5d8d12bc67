//! schedule-http - HTTP client for the university schedule REST API.
//!
//! The [`ApiClient`] owns the access/refresh credential pair and implements
//! [`schedule_core::Api`], transparently refreshing an expired access token
//! once per call.

mod client;
mod config;
mod transport;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_USER_AGENT};
