//! Error types for the todo API client.

use std::fmt;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with an unexpected status. `message` is the
    /// `error` field of the JSON body when there is one, else the raw body.
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// True for 400 responses: the request itself was rejected.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::HttpError { status, .. } if (400..500).contains(status))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpError { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
