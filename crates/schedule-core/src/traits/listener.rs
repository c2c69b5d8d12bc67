//! Session expiry notification.

/// Receives the "session expired" side effect of a call.
///
/// Called after the client has given up on the current credentials, so the
/// UI can route the user back to login.
pub trait SessionListener: Send + Sync {
    fn session_expired(&self);
}

/// A listener that ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl SessionListener for NoopListener {
    fn session_expired(&self) {}
}
