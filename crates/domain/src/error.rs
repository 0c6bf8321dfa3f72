//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building or validating specs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A JSON field path could not be parsed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidPath {
        /// The offending path expression.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// A regular expression in an expectation is invalid.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// The spec was built without a target URL.
    #[error("spec has no request target")]
    MissingTarget,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
