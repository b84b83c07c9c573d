//! Error types for argument resolution and command dispatch.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors surfaced to the user by the `prior` binary.
///
/// Everything except `Config` and `Api` is detected before any network call.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong or missing positional arguments. Carries the command usage text.
    #[error("{message}\n\n{usage}")]
    Usage { message: String, usage: String },

    /// A required named field is absent or a value is out of range.
    #[error("{0}")]
    Validation(String),

    /// Stdin was present but is not parseable JSON.
    #[error("Invalid JSON on stdin: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Stdin was present but is not UTF-8, so it cannot be JSON either.
    #[error("Invalid JSON on stdin: {0}")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),

    /// First positional does not name a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Failed to read standard input.
    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CliError {
    pub fn usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        CliError::Usage {
            message: message.into(),
            usage: usage.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Stable machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Usage { .. } => "usage",
            CliError::Validation(_) => "validation",
            CliError::InvalidJson(_) | CliError::InvalidEncoding(_) => "invalid_json",
            CliError::UnknownCommand(_) => "unknown_command",
            CliError::Stdin(_) => "stdin",
            CliError::Config(_) => "config",
            CliError::Api(_) => "api",
        }
    }
}
