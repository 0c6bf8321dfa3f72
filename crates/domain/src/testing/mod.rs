//! Response expectations and their evaluation.

mod expectation;
mod runner;

pub use expectation::{AssertionResult, Evaluation, Expectation, StatusExpectation};
pub use runner::ExpectationRunner;
