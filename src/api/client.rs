use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde_json::Value;
use uuid::Uuid;

use crate::api::{ApiError, ApiRequest};
use crate::config::{Config, SecureString};
use crate::nudge::expand_nudge_tokens;

/// Client for the knowledge service. One attempt per call, no retries.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<SecureString>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("prior-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL for a request. Path segments are percent-encoded.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let invalid = |reason: &str| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base"))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    /// Execute a request and return the decoded JSON body.
    ///
    /// An empty success body decodes to `Value::Null`.
    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let api_key = self.api_key.as_ref().ok_or(ApiError::MissingCredential)?;
        let url = self.url_for(request)?;
        let request_id = Uuid::new_v4().to_string();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| ApiError::MissingCredential)?;
        auth.set_sensitive(true);

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(AUTHORIZATION, auth)
            .header("X-Request-Id", &request_id);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::info!(request_id = %request_id, call = %request.describe(), "sending request");
        let response = builder.send().await.map_err(|source| ApiError::Connection {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Connection {
            url: url.to_string(),
            source,
        })?;
        tracing::info!(request_id = %request_id, status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `error.message`, `error` (string), then `message`; falls back
/// to the raw body and finally the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/message")
            .or_else(|| v.get("error").filter(|e| e.is_string()))
            .or_else(|| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    let message = match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => reason.unwrap_or("request failed").to_string(),
    };
    expand_nudge_tokens(&message).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn client(base_url: &str) -> ApiClient {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn url_joins_segments_under_base_path() {
        let request = ApiRequest::new(Method::GET, &["v1", "knowledge", "k_1"]);
        let url = client("https://example.com/api/").url_for(&request).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/knowledge/k_1");
    }

    #[test]
    fn url_encodes_segments() {
        let request = ApiRequest::new(Method::GET, &["v1", "knowledge", "a/b c"]);
        let url = client("https://example.com").url_for(&request).unwrap();
        assert_eq!(url.as_str(), "https://example.com/v1/knowledge/a%2Fb%20c");
    }

    #[test]
    fn error_message_prefers_nested_message() {
        let body = r#"{"error": {"message": "Entry not found"}}"#;
        assert_eq!(error_message(body, Some("Not Found")), "Entry not found");
    }

    #[test]
    fn error_message_expands_nudges() {
        let body = r#"{"message": "Out of credits. [PRIOR:CONTRIBUTE] to earn more."}"#;
        assert_eq!(
            error_message(body, None),
            "Out of credits. `prior contribute` to earn more."
        );
    }

    #[test]
    fn error_message_falls_back_to_reason() {
        assert_eq!(error_message("", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("upstream down", None), "upstream down");
    }

    #[tokio::test]
    async fn send_without_key_fails_before_network() {
        let request = ApiRequest::new(Method::GET, &["v1", "agents", "me"]);
        let err = client("http://127.0.0.1:1").send(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential));
    }
}
