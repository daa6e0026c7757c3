//! Error types for the help engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or driving the help engine
///
/// Everything except [`Error::ResponsePending`] and [`Error::Scheduler`] is a
/// load-time failure: once an [`Engine`](crate::Engine) is built, `classify`
/// and `search` cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Two knowledge entries share an id
    #[error("duplicate knowledge entry id: {0}")]
    DuplicateEntryId(String),

    /// A knowledge entry failed validation
    #[error("invalid knowledge entry {id:?}: {reason}")]
    InvalidEntry { id: String, reason: String },

    /// A keyword rule failed validation
    #[error("invalid keyword rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },

    /// Fallback pool has no usable responses
    #[error("fallback pool is empty")]
    EmptyFallbackPool,

    /// Delay range is inverted
    #[error("invalid delay range: min {min_ms}ms > max {max_ms}ms")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },

    /// A response is still pending for this conversation
    #[error("a response is already pending")]
    ResponsePending,

    /// Scheduled response task failed
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
