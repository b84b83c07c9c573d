use serde::{Deserialize, Serialize};

use crate::config::credentials::SecureString;

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service base URL (scheme + host, optional path prefix).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// API key. Only ever taken from the environment, never from the file.
    #[serde(skip)]
    pub api_key: Option<SecureString>,
}

fn default_base_url() -> String {
    "https://api.cg3.io".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            api_key: None,
        }
    }
}
