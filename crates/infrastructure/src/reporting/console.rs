//! Human-readable report sink.

use std::io::{self, Write};

use probe_application::ReportError;
use probe_application::ports::ReportSink;
use probe_domain::{RunReport, TestOutcome};

/// Writes one line per test and a summary line.
///
/// ```text
/// PASS  list objects (41 ms)
/// FAIL  get unknown id (37 ms)
///       assertion: Status code = 404 failed: Expected status = 404, got 200 OK
///
/// 1 passed, 1 failed, 2 total (50.0%) in 80 ms
/// ```
pub struct ConsoleReportSink<W: Write + Send + Sync> {
    out: W,
}

impl ConsoleReportSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> ConsoleReportSink<W> {
    /// Creates a sink writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_outcome(&mut self, outcome: &TestOutcome) -> io::Result<()> {
        let label = if outcome.is_passed() { "PASS" } else { "FAIL" };
        writeln!(
            self.out,
            "{label}  {} ({} ms)",
            outcome.name, outcome.duration_ms
        )?;
        if let Some(failure) = &outcome.failure {
            writeln!(self.out, "      {}: {}", failure.kind, failure.message)?;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> ReportSink for ConsoleReportSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&mut self, report: &RunReport) -> Result<(), ReportError> {
        for outcome in &report.outcomes {
            self.write_outcome(outcome)?;
        }
        writeln!(
            self.out,
            "\n{} passed, {} failed, {} total ({:.1}%) in {} ms",
            report.passed,
            report.failed,
            report.total,
            report.pass_rate(),
            report.duration_ms
        )?;
        self.out.flush()?;
        Ok(())
    }
}
