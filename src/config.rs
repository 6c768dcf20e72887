//! Application configuration loaded from environment variables.
//!
//! - `PRIVITRADE_API_URL`: base URL of the price API (default
//!   `http://127.0.0.1:3000`).
//! - `PRIVITRADE_POLL_INTERVAL_MS`: price refresh period in milliseconds
//!   (default `5000`).
//! - `PRIVITRADE_LOG_FILE`: optional path; when set, tracing output is
//!   written there instead of being discarded.

use std::path::PathBuf;
use std::time::Duration;

/// Default price API endpoint.
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Default price refresh period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Destination for tracing output, if any.
    pub log_file: Option<PathBuf>,
}

/// Price API configuration values.
#[derive(Debug)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub poll_interval: Duration,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`PriviTradeError::Config`](crate::PriviTradeError::Config) if
/// `PRIVITRADE_POLL_INTERVAL_MS` is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url = non_empty_var("PRIVITRADE_API_URL")
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let poll_interval = match non_empty_var("PRIVITRADE_POLL_INTERVAL_MS") {
        Some(raw) => parse_interval(&raw)?,
        None => DEFAULT_POLL_INTERVAL,
    };

    let log_file = non_empty_var("PRIVITRADE_LOG_FILE").map(PathBuf::from);

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            poll_interval,
        },
        log_file,
    })
}

fn parse_interval(raw: &str) -> crate::Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(crate::PriviTradeError::Config(format!(
            "PRIVITRADE_POLL_INTERVAL_MS must be a positive integer, got {raw:?}"
        ))),
    }
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
