//! Per-run test outcome records.
//!
//! A run accumulates one [`TestOutcome`] per scenario; closing the run turns
//! them into a [`RunReport`] that is handed to the report sinks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a test passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Every step succeeded.
    Passed,
    /// A step failed.
    Failed,
}

/// Category of a test failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request could not be completed (timeout, DNS, connection).
    Network,
    /// A response was received but an expectation did not hold.
    Assertion,
    /// A returned value could not be extracted from the response.
    Extraction,
    /// A step needed a value no earlier step provided.
    MissingInput,
    /// The request was rejected before being sent.
    InvalidRequest,
}

impl FailureKind {
    /// Returns the snake_case label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Assertion => "assertion",
            Self::Extraction => "extraction",
            Self::MissingInput => "missing_input",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a test failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
}

/// Outcome of one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test name.
    pub name: String,
    /// Pass/fail.
    pub status: OutcomeStatus,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Failure detail, present when the test failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDetail>,
}

impl TestOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn passed(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Passed,
            duration_ms,
            failure: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn failed(
        name: impl Into<String>,
        duration_ms: u64,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Failed,
            duration_ms,
            failure: Some(FailureDetail {
                kind,
                message: message.into(),
            }),
        }
    }

    /// Returns true if the test passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }
}

/// Finished report for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of the run.
    pub run_id: Uuid,
    /// When the run was opened.
    pub started_at: DateTime<Utc>,
    /// When the run was closed.
    pub finished_at: DateTime<Utc>,
    /// Outcomes in the order they were recorded.
    pub outcomes: Vec<TestOutcome>,
    /// Number of tests.
    pub total: usize,
    /// Number of passed tests.
    pub passed: usize,
    /// Number of failed tests.
    pub failed: usize,
    /// Wall-clock run duration in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Create a report from recorded outcomes.
    #[must_use]
    pub fn new(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcomes: Vec<TestOutcome>,
    ) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.is_passed()).count();
        let duration_ms = u64::try_from((finished_at - started_at).num_milliseconds()).unwrap_or(0);

        Self {
            run_id,
            started_at,
            finished_at,
            outcomes,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage; an empty run counts as fully passed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Returns the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(|o| !o.is_passed())
    }
}
