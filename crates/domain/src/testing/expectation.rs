//! Expectations evaluated against a received response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json::JsonPath;

/// A declarative expectation about a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Check response status code.
    StatusCode {
        /// Expected status code or range.
        expected: StatusExpectation,
    },
    /// Check that the JSON body structurally contains a document.
    JsonLike {
        /// Partial document that must appear in the body.
        expected: Value,
    },
    /// Check that the value at a path structurally contains a document.
    JsonLikeAt {
        /// Path into the JSON body.
        path: JsonPath,
        /// Partial document that must appear at the path.
        expected: Value,
    },
    /// Check that the JSON body equals a document exactly.
    JsonEquals {
        /// Expected document.
        expected: Value,
    },
    /// Check body contains text.
    BodyContains {
        /// Text to search for.
        text: String,
        /// Case-insensitive search.
        #[serde(default)]
        ignore_case: bool,
    },
    /// Check body matches regex pattern.
    BodyMatches {
        /// Regex pattern.
        pattern: String,
    },
    /// Check header exists and optionally its value.
    Header {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        value: Option<String>,
    },
    /// Check response time.
    ResponseTime {
        /// Maximum allowed time in milliseconds.
        max_ms: u64,
    },
}

impl Expectation {
    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::JsonLike { expected } => format!("JSON like {expected}"),
            Self::JsonLikeAt { path, expected } => format!("JSON at {path} like {expected}"),
            Self::JsonEquals { .. } => "JSON equals expected".to_string(),
            Self::BodyContains { text, .. } => format!("Body contains '{text}'"),
            Self::BodyMatches { pattern } => format!("Body matches /{pattern}/"),
            Self::Header {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::Header { name, value: None } => format!("Header '{name}' exists"),
            Self::ResponseTime { max_ms } => format!("Response time <= {max_ms}ms"),
        }
    }

    /// Returns the expected JSON document, if this expectation carries one.
    #[must_use]
    pub fn expected_json_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::JsonLike { expected }
            | Self::JsonLikeAt { expected, .. }
            | Self::JsonEquals { expected } => Some(expected),
            _ => None,
        }
    }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// The expectation that was evaluated.
    pub expectation: Expectation,
    /// Whether the expectation held.
    pub passed: bool,
    /// Expected value (for display).
    pub expected: Option<String>,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(expectation: Expectation) -> Self {
        Self {
            expectation,
            passed: true,
            expected: None,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(expectation: Expectation, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(expectation)
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(expectation: Expectation, error: impl Into<String>) -> Self {
        Self {
            expectation,
            passed: false,
            expected: None,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with expected and actual values.
    #[must_use]
    pub fn fail_with_values(
        expectation: Expectation,
        expected: impl Into<String>,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            expected: Some(expected.into()),
            actual: Some(actual.into()),
            ..Self::fail(expectation, error)
        }
    }
}

/// Results of evaluating an ordered list of expectations.
///
/// Evaluation stops at the first failure; the expectations after it are
/// counted as skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// Results in evaluation order, ending at the first failure.
    pub results: Vec<AssertionResult>,
    /// Number of expectations not evaluated.
    pub skipped: usize,
}

impl Evaluation {
    /// Returns true if every expectation was evaluated and held.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.skipped == 0 && self.results.iter().all(|r| r.passed)
    }

    /// Returns the failing result, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&AssertionResult> {
        self.results.iter().find(|r| !r.passed)
    }

    /// Consumes the evaluation and returns the failing result, if any.
    #[must_use]
    pub fn into_failure(self) -> Option<AssertionResult> {
        self.results.into_iter().find(|r| !r.passed)
    }
}
