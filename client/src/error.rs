//! Error types for the todo-sync client

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message used when the service fails without saying why.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors that can occur when talking to the list service
///
/// The request pipeline is the only place these are told apart. Service
/// operations and stores pass them through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The service could not be reached, or the exchange broke off
    #[error("Request failed: {0}")]
    Transport(String),

    /// The request could not be built (e.g. a token that is not a valid header)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body was not the JSON that was expected
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The service rejected the credential; the session has been ended
    #[error("Unauthorized")]
    Unauthorized,

    /// The service answered with an error of its own
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },
}

impl ClientError {
    /// Whether this is the credential-rejected error
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Transport(_) | Self::InvalidRequest(_) | Self::MalformedResponse(_) => None,
        }
    }
}

/// Configuration could not be loaded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is not an absolute http(s) URL
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// Rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The page size is not a positive integer
    #[error("Invalid page size {0:?}")]
    InvalidPageSize(String),

    /// The unauthenticated route is not an absolute path
    #[error("Invalid login route {0:?}: must start with '/'")]
    InvalidRoute(String),
}
