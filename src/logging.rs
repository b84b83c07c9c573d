//! File-only tracing for the `prior` binary.
//!
//! stdout carries command output and stderr carries `Error:` lines, so log
//! records never go to either. They are written only when `PRIOR_LOG` names
//! a file.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file prefix.
pub const ENV_LOG_PATH: &str = "PRIOR_LOG";

/// Filter used when `RUST_LOG` is unset or unparseable.
const DEFAULT_FILTER: &str = "info";

/// Per-invocation log file: `{prefix}.{unix_seconds}.{pid}`.
///
/// Each CLI run gets its own file, so agents invoking `prior` in parallel
/// never interleave records.
pub fn log_file_path(prefix: &str, unix_seconds: u64, pid: u32) -> PathBuf {
    PathBuf::from(format!("{prefix}.{unix_seconds}.{pid}"))
}

/// Install the global subscriber if `PRIOR_LOG` is set to a non-empty value.
pub fn init_tracing() {
    let Some(prefix) = std::env::var(ENV_LOG_PATH).ok().filter(|p| !p.trim().is_empty()) else {
        return;
    };

    let unix_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = log_file_path(&prefix, unix_seconds, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: {ENV_LOG_PATH} ignored, cannot create {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
