//! Error types
//!
//! Documentation extraction is total over any program the front end accepted:
//! unclassifiable symbols, unsupported type shapes and missing or malformed
//! comments are all recovered locally. The errors here are the ones that do
//! reach the caller: failures reported by the checker collaborator itself,
//! plus configuration and serialization problems around the core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for tsdoc-map operations
pub type DocResult<T> = Result<T, DocError>;

/// Main error type for tsdoc-map
#[derive(Debug, Error)]
pub enum DocError {
    /// The checker could not answer a query (unresolvable import, rejected declaration, ...)
    #[error("checker failure: {0}")]
    Checker(String),

    /// A handle that the collaborator does not know about
    #[error("unknown {kind} handle #{index}")]
    UnknownHandle { kind: &'static str, index: u32 },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error in {file}: {source}")]
    Toml {
        file: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl DocError {
    /// Create a checker failure
    pub fn checker(message: impl Into<String>) -> Self {
        DocError::Checker(message.into())
    }

    /// Create an unknown-handle error
    pub fn unknown_handle(kind: &'static str, index: u32) -> Self {
        DocError::UnknownHandle { kind, index }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        DocError::Config(message.into())
    }

    /// Whether this error originated in the checker collaborator
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, DocError::Checker(_) | DocError::UnknownHandle { .. })
    }
}
