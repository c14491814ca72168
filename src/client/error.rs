use reqwest::StatusCode;
use serde::Deserialize;
use std::{fmt, io};

/// Sum type representing every way a call to the backend can fail.
///
/// "Not authenticated" is deliberately absent: the auth store treats it as a
/// normal state rather than a failure.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a usable response.
    Transport(reqwest::Error),
    /// The server answered with a non-success status. `detail` carries the
    /// server's own explanation when one was given.
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    /// Rejected before leaving the client.
    Invalid(String),
    /// The token could not be persisted or removed.
    Storage(io::Error),
}

impl ApiError {
    /// The message to surface to a user: the server's `detail` or our own
    /// validation message when available, otherwise the supplied default.
    pub fn message_or<T: ToString>(&self, default: T) -> String {
        match self {
            ApiError::Server {
                detail: Some(d), ..
            } => d.to_owned(),
            ApiError::Invalid(m) => m.to_owned(),
            _ => default.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Server { status, .. } => *status == StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ApiError::Transport(e) => format!("API request failed: {:?}", e),
            ApiError::Server {
                status,
                detail: Some(d),
            } => format!("API returned {}: {}", status, d),
            ApiError::Server {
                status,
                detail: None,
            } => format!("API returned {}", status),
            ApiError::Invalid(m) => format!("Invalid request: {}", m),
            ApiError::Storage(e) => format!("Token storage failed: {}", e),
        };

        write!(f, "{}", x)
    }
}

/// The error body shape used by the backend.
///
/// ```json
/// { "detail": "Post not found" }
/// ```
// Validation failures put a list of objects under `detail` rather than a
// string; those are treated as having no detail.
#[derive(Deserialize)]
pub(super) struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn into_detail(self) -> Option<String> {
        match self.detail {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        }
    }
}
