//! Probe Domain - Core contract-testing types
//!
//! This crate defines the domain model for the Probe HTTP contract harness:
//! request and response specs, expectations and their evaluation, JSON
//! paths and partial matching, and per-run report records.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod json;
pub mod report;
pub mod request;
pub mod response;
pub mod spec;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use json::{JsonMismatch, JsonPath, PathSegment, json_like};
pub use report::{FailureDetail, FailureKind, OutcomeStatus, RunReport, TestOutcome};
pub use spec::{Spec, SpecBuilder, spec};
pub use testing::{AssertionResult, Evaluation, Expectation, ExpectationRunner, StatusExpectation};
