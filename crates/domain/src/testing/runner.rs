//! Expectation runner.
//!
//! Evaluates expectations against a received response, in order, stopping at
//! the first one that does not hold.

use regex::RegexBuilder;
use serde_json::Value;

use super::{AssertionResult, Evaluation, Expectation, StatusExpectation};
use crate::json::{JsonPath, json_like};
use crate::response::ResponseSpec;

const PREVIEW_CHARS: usize = 100;

/// Evaluates expectations against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpectationRunner;

impl ExpectationRunner {
    /// Create a new expectation runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate expectations in order, stopping at the first failure.
    #[must_use]
    pub fn run(&self, expectations: &[Expectation], response: &ResponseSpec) -> Evaluation {
        let mut results = Vec::with_capacity(expectations.len());

        for (index, expectation) in expectations.iter().enumerate() {
            let result = self.run_expectation(expectation, response);
            let failed = !result.passed;
            results.push(result);

            if failed {
                return Evaluation {
                    results,
                    skipped: expectations.len() - index - 1,
                };
            }
        }

        Evaluation {
            results,
            skipped: 0,
        }
    }

    /// Evaluate a single expectation against a response.
    #[must_use]
    pub fn run_expectation(
        &self,
        expectation: &Expectation,
        response: &ResponseSpec,
    ) -> AssertionResult {
        match expectation {
            Expectation::StatusCode { expected } => {
                Self::check_status_code(expectation, response, expected)
            }
            Expectation::JsonLike { expected } => {
                Self::check_json_like(expectation, response, None, expected)
            }
            Expectation::JsonLikeAt { path, expected } => {
                Self::check_json_like(expectation, response, Some(path), expected)
            }
            Expectation::JsonEquals { expected } => {
                Self::check_json_equals(expectation, response, expected)
            }
            Expectation::BodyContains { text, ignore_case } => {
                Self::check_body_contains(expectation, response, text, *ignore_case)
            }
            Expectation::BodyMatches { pattern } => {
                Self::check_body_matches(expectation, response, pattern)
            }
            Expectation::Header { name, value } => {
                Self::check_header(expectation, response, name, value.as_deref())
            }
            Expectation::ResponseTime { max_ms } => {
                Self::check_response_time(expectation, response, *max_ms)
            }
        }
    }

    fn check_status_code(
        expectation: &Expectation,
        response: &ResponseSpec,
        expected: &StatusExpectation,
    ) -> AssertionResult {
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(expectation.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_values(
                expectation.clone(),
                expected.description(),
                response.status_code().to_string(),
                format!(
                    "Expected status {}, got {}",
                    expected.description(),
                    response.status_code()
                ),
            )
        }
    }

    fn check_json_like(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: Option<&JsonPath>,
        expected: &Value,
    ) -> AssertionResult {
        let Some(json) = response.json() else {
            return Self::not_json(expectation, response);
        };

        let target = match path {
            Some(path) => match path.resolve(json) {
                Some(value) => value,
                None => {
                    return AssertionResult::fail(
                        expectation.clone(),
                        format!("JSON path '{path}' not found"),
                    );
                }
            },
            None => json,
        };

        match json_like(expected, target) {
            Ok(()) => AssertionResult::pass(expectation.clone()),
            Err(mismatch) => AssertionResult::fail_with_values(
                expectation.clone(),
                expected.to_string(),
                target.to_string(),
                format!("JSON does not match {mismatch}"),
            ),
        }
    }

    fn check_json_equals(
        expectation: &Expectation,
        response: &ResponseSpec,
        expected: &Value,
    ) -> AssertionResult {
        let Some(json) = response.json() else {
            return Self::not_json(expectation, response);
        };

        if json == expected {
            AssertionResult::pass(expectation.clone())
        } else {
            AssertionResult::fail_with_values(
                expectation.clone(),
                expected.to_string(),
                json.to_string(),
                "JSON body does not equal expected value",
            )
        }
    }

    fn check_body_contains(
        expectation: &Expectation,
        response: &ResponseSpec,
        text: &str,
        ignore_case: bool,
    ) -> AssertionResult {
        let body = &response.body;
        let contains = if ignore_case {
            body.to_lowercase().contains(&text.to_lowercase())
        } else {
            body.contains(text)
        };

        if contains {
            AssertionResult::pass(expectation.clone())
        } else {
            AssertionResult::fail_with_values(
                expectation.clone(),
                text,
                response.body_preview(PREVIEW_CHARS),
                format!("Body does not contain '{text}'"),
            )
        }
    }

    fn check_body_matches(
        expectation: &Expectation,
        response: &ResponseSpec,
        pattern: &str,
    ) -> AssertionResult {
        match RegexBuilder::new(pattern).build() {
            Ok(regex) if regex.is_match(&response.body) => {
                AssertionResult::pass(expectation.clone())
            }
            Ok(_) => AssertionResult::fail_with_values(
                expectation.clone(),
                format!("/{pattern}/"),
                response.body_preview(PREVIEW_CHARS),
                format!("Body does not match pattern '{pattern}'"),
            ),
            Err(e) => AssertionResult::fail(
                expectation.clone(),
                format!("Invalid regex pattern '{pattern}': {e}"),
            ),
        }
    }

    fn check_header(
        expectation: &Expectation,
        response: &ResponseSpec,
        name: &str,
        expected_value: Option<&str>,
    ) -> AssertionResult {
        match (response.get_header(name), expected_value) {
            (Some(actual), Some(expected)) if actual != expected => {
                AssertionResult::fail_with_values(
                    expectation.clone(),
                    expected,
                    actual.clone(),
                    format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
                )
            }
            (Some(actual), _) => AssertionResult::pass_with_value(expectation.clone(), actual.clone()),
            (None, _) => {
                AssertionResult::fail(expectation.clone(), format!("Header '{name}' not found"))
            }
        }
    }

    fn check_response_time(
        expectation: &Expectation,
        response: &ResponseSpec,
        max_ms: u64,
    ) -> AssertionResult {
        let actual_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX);
        if actual_ms <= max_ms {
            AssertionResult::pass_with_value(expectation.clone(), format!("{actual_ms}ms"))
        } else {
            AssertionResult::fail_with_values(
                expectation.clone(),
                format!("<= {max_ms}ms"),
                format!("{actual_ms}ms"),
                format!("Response took {actual_ms}ms, expected <= {max_ms}ms"),
            )
        }
    }

    fn not_json(expectation: &Expectation, response: &ResponseSpec) -> AssertionResult {
        AssertionResult::fail_with_values(
            expectation.clone(),
            "a JSON body",
            response.body_preview(PREVIEW_CHARS),
            "Body is not valid JSON",
        )
    }
}
