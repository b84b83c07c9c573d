//! Client configuration: optional TOML file plus environment overrides.

mod credentials;
mod loader;
mod types;

pub use credentials::SecureString;
pub use loader::{ConfigError, ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECONDS};
pub use types::Config;
