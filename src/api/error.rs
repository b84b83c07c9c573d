//! Errors from the API collaborator.

use thiserror::Error;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No credential available for an authenticated call.
    #[error("PRIOR_API_KEY is not set")]
    MissingCredential,

    /// Base URL could not be combined with the request path.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Failed to connect or the request did not complete.
    #[error("Request to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Response body was not JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}
