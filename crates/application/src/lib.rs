//! Probe Application - Harness use cases and ports
//!
//! This crate executes contract specs through the `HttpClient` port, threads
//! captured values through scenario steps, and collects per-run reports for
//! the `ReportSink` port.

pub mod config;
pub mod error;
pub mod harness;
pub mod ports;
pub mod reporter;
pub mod scenario;
pub mod suite;
pub mod variables;

#[cfg(test)]
mod test_support;

pub use config::{DEFAULT_TIMEOUT_MS, HarnessConfig};
pub use error::{AssertionFailure, ReportError, StepError, StepResult};
pub use harness::{Harness, SpecOutcome, extract};
pub use ports::{Clock, HttpClient, HttpClientError, ReportSink};
pub use reporter::ReportCollector;
pub use scenario::ScenarioContext;
pub use suite::Suite;
pub use variables::{Captures, Placeholder, has_placeholders, parse_placeholders};
