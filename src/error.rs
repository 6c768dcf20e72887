//! Crate-level error types.
//!
//! [`PriviTradeError`] unifies every error source (configuration, HTTP,
//! JSON, terminal I/O, rejected user input) behind a single enum so callers
//! can match on the variant they care about while still using the `?`
//! operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PriviTradeError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum PriviTradeError {
    /// Environment configuration or the instrument catalog is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal setup, teardown or drawing failed.
    #[error("io error: {0}")]
    Io(String),

    /// A selection index outside the catalog bounds was rejected.
    #[error("selection index {index} out of range for {len} instruments")]
    InvalidSelection { index: usize, len: usize },

    /// The order draft did not pass validation at the submit boundary.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
}
