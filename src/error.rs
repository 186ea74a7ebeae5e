//! Error types for scrollspy
//!
//! Nothing in this crate is fatal to the host: every failure degrades to a
//! safe default (see the `navigate` module for the capability-probe
//! fallback). The types here exist so hosts can report *why* an operation
//! degraded, not to abort anything.

use thiserror::Error;

/// Errors a [`Document`](crate::Document) implementation may surface.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("scroll request failed: {0}")]
    ScrollFailed(String),

    #[error("capability probe failed: {0}")]
    CapabilityProbe(String),

    #[error("document query failed: {0}")]
    QueryFailed(String),
}

/// Top-level error type for scrollspy
#[derive(Debug, Error)]
pub enum Error {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for scrollspy
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for host document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
