//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and external systems.
//! Each port is a trait implemented by an adapter in the infrastructure layer.

mod clock;
mod http_client;
mod report_sink;

pub use clock::Clock;
pub use http_client::{HttpClient, HttpClientError};
pub use report_sink::ReportSink;
