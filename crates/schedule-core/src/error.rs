//! Error types for the schedule client.
//!
//! Every failure a call can produce is one of these variants. Errors are
//! `Clone + PartialEq` so that identical backend responses produce identical
//! outcomes.

use thiserror::Error;

/// The unified error type for schedule client operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Network transport errors: no response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend rejected the request for a reason other than authentication.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// No usable credential pair remains; the user has to log in again.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// A response body did not have the shape a typed view expected.
    #[error("unexpected response: {message}")]
    Decode { message: String },

    /// Input validation errors (base URL, request body encoding).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Credential store errors.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns true if the caller must re-authenticate.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }

    /// Returns the HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
///
/// The message is the underlying error text, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Network connection failed (DNS, refused, TLS).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other failure while sending the request.
    #[error("{message}")]
    Request { message: String },
}

/// A non-success response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Human readable message extracted from the response body.
    pub message: String,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Request body could not be encoded.
    #[error("invalid request body: {reason}")]
    Body { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Credential store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The stored data could not be parsed.
    #[error("corrupt credential store: {message}")]
    Corrupt { message: String },
}
