//! Thin HTTP collaborator: one validated command → one request/response.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// A single call against the service, independent of any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments appended to the base URL; each one is percent-encoded.
    pub segments: Vec<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Display form used in logs, e.g. `GET /v1/agents/me`.
    pub fn describe(&self) -> String {
        format!("{} /{}", self.method, self.segments.join("/"))
    }
}
