//! Error types for the catalog client.

use catalog_admin_core::EmailError;
use catalog_admin_core::validation::FormErrors;
use thiserror::Error;

use crate::config::ConfigError;

/// Fallback message when the server gives no usable error text.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors from a single REST call.
///
/// `Display` is the user-facing message: for server errors it is exactly the
/// server's `message` (or status text), which is what the state slices store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The token is missing, invalid or expired (401/403).
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The endpoint could not be joined onto the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized(_) | Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file could not be read or written.
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session file exists but is not valid JSON.
    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors surfaced by [`Dashboard`](crate::Dashboard) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Form input failed validation; nothing was sent.
    #[error("Invalid input: {0}")]
    Validation(#[from] FormErrors),

    /// Login email failed validation; nothing was sent.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The result was superseded by a newer request and dropped.
    #[error("Request was superseded by a newer one")]
    Superseded,
}
