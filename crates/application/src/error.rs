//! Application error types

use std::fmt;

use probe_domain::{AssertionResult, DomainError, FailureKind};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Result type for a single scenario step.
pub type StepResult<T> = Result<T, StepError>;

/// Why a step of a scenario failed.
///
/// A step error is local to the scenario that produced it.
#[derive(Debug, Clone, Error)]
pub enum StepError {
    /// The request could not be completed (DNS, connection, timeout).
    #[error("could not complete request: {0}")]
    Network(HttpClientError),

    /// An expectation did not hold for the received response.
    #[error("{0}")]
    Assertion(AssertionFailure),

    /// A value could not be extracted from the response.
    #[error("could not extract '{path}': {reason}")]
    Extraction {
        /// The path that was looked up.
        path: String,
        /// Why extraction failed.
        reason: String,
    },

    /// A step needed a captured value that does not exist.
    #[error("missing required input '{name}'")]
    MissingInput {
        /// Name of the missing capture.
        name: String,
    },

    /// The request was rejected before any I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl StepError {
    /// Returns the report category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::Network,
            Self::Assertion(_) => FailureKind::Assertion,
            Self::Extraction { .. } => FailureKind::Extraction,
            Self::MissingInput { .. } => FailureKind::MissingInput,
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
        }
    }

    /// Creates a missing input error.
    #[must_use]
    pub fn missing_input(name: impl Into<String>) -> Self {
        Self::MissingInput { name: name.into() }
    }

    /// Creates an extraction error.
    #[must_use]
    pub fn extraction(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for StepError {
    fn from(err: DomainError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<AssertionFailure> for StepError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Assertion(failure)
    }
}

/// Details of the first expectation that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// Description of the expectation.
    pub expectation: String,
    /// Expected value, when one applies.
    pub expected: Option<String>,
    /// Actual value, when one was observed.
    pub actual: Option<String>,
    /// Failure message.
    pub message: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.expectation, self.message)
    }
}

impl From<AssertionResult> for AssertionFailure {
    fn from(result: AssertionResult) -> Self {
        let message = result
            .error
            .unwrap_or_else(|| "expectation not met".to_string());
        Self {
            expectation: result.expectation.description(),
            expected: result.expected,
            actual: result.actual,
            message,
        }
    }
}

/// Errors raised while finishing or writing a run report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A sink could not write the report.
    #[error("report sink '{sink}' failed: {message}")]
    Sink {
        /// Sink name.
        sink: String,
        /// Failure message.
        message: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}
