//! Client configuration.

use std::time::Duration;

use schedule_core::ApiUrl;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("schedule/", env!("CARGO_PKG_VERSION"));

/// Settings for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root every request path is relative to.
    pub base_url: ApiUrl,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Per-request timeout. `None` leaves timing to the transport.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
