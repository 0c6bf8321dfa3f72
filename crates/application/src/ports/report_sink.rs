//! Report sink port

use probe_domain::RunReport;

use crate::error::ReportError;

/// Destination for a finished run report (console, file, CI artifact).
///
/// A sink receives each report exactly once, when the collector is closed.
pub trait ReportSink: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Writes the finished report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn write(&mut self, report: &RunReport) -> Result<(), ReportError>;
}
