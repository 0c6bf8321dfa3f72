//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: a reqwest HTTP client, the system
//! clock, and console and JSON file report sinks.

pub mod adapters;
pub mod reporting;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use reporting::{ConsoleReportSink, JsonFileReportSink};
pub use serialization::{SerializationError, to_json_stable};
