//! Error types for spotgraph
//!
//! Every phase (ingest, persist, read back, export) reports failures through
//! [`Error`]. The command layer decides which variants are fatal: a store that
//! cannot be cleared only warns, a store that fails while saving aborts the
//! run, and a quota error ends the export loop early.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing credentials for the source or the sink
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    /// Source playlist missing or unparseable
    #[error("Not found: {0}")]
    NotFound(String),

    /// Graph store could not be reached
    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    /// Graph store was reached but rejected or failed a statement
    #[error("Graph store error: {0}")]
    Store(String),

    /// Nothing to work with (no tracks extracted, no songs stored)
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Sink request quota exhausted for today
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Sink has no result for a song
    #[error("No match for '{0}'")]
    NoMatch(String),

    /// Entity rejected at construction
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the failure that ends an export loop early.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Error::QuotaExceeded(_))
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            Error::StoreUnavailable(err.to_string())
        } else {
            Error::Store(err.to_string())
        }
    }
}

/// Convenience Result type using spotgraph Error
pub type Result<T> = std::result::Result<T, Error>;
