//! Token types for bearer authentication.

use std::fmt;

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived bearer tokens sent in the `Authorization`
/// header of every call.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token for obtaining new access tokens.
///
/// Refresh tokens are longer-lived and used solely to mint new access tokens.
/// The backend does not rotate them: a successful refresh keeps the same one.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The access/refresh pair held by a client.
///
/// The session counts as authenticated only when both halves are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialPair {
    pub access: Option<AccessToken>,
    pub refresh: Option<RefreshToken>,
}

impl CredentialPair {
    /// Create a pair from a fresh login.
    pub fn new(access: AccessToken, refresh: RefreshToken) -> Self {
        Self {
            access: Some(access),
            refresh: Some(refresh),
        }
    }

    /// Returns true if both credentials are held.
    pub fn is_complete(&self) -> bool {
        self.access.is_some() && self.refresh.is_some()
    }

    /// Drop both credentials.
    pub fn clear(&mut self) {
        self.access = None;
        self.refresh = None;
    }
}
