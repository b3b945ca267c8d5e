use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;

/// Failures produced by [`crate::api::client::ApiClient`].
///
/// Each variant is assigned by the layer that observed the failure, so callers
/// can branch on the kind without inspecting message text.
#[derive(Debug)]
pub enum ApiError {
    /// Input failed a shape constraint; no request was sent.
    Validation(String),

    /// The request never produced an HTTP response (DNS, refused connection,
    /// TLS, broken transport).
    Connectivity(reqwest::Error),

    /// The server answered 401.
    Unauthorized,

    /// The server reported success but the body was not what the endpoint
    /// promises (for example a login response without a token).
    Protocol(String),

    /// Any other non-success status. `message` is the server-provided text
    /// when one was found, otherwise a per-operation fallback.
    Request { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(message) => write!(f, "{message}"),
            ApiError::Connectivity(_) => write!(
                f,
                "Unable to reach the chat server. Check your network connection."
            ),
            ApiError::Unauthorized => {
                write!(f, "Your session has expired. Please log in again.")
            }
            ApiError::Protocol(message) => write!(f, "Unexpected server response: {message}"),
            ApiError::Request { message, .. } => write!(f, "{message}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Connectivity(source) => Some(source),
            _ => None,
        }
    }
}
