//! JSON report file sink.

use std::fs;
use std::path::{Path, PathBuf};

use probe_application::ReportError;
use probe_application::ports::ReportSink;
use probe_domain::RunReport;
use tracing::debug;

use crate::serialization::to_json_stable;

/// Writes the report as pretty JSON to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct JsonFileReportSink {
    path: PathBuf,
}

impl JsonFileReportSink {
    /// Creates a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileReportSink {
    fn name(&self) -> &str {
        "json-file"
    }

    fn write(&mut self, report: &RunReport) -> Result<(), ReportError> {
        let json =
            to_json_stable(report).map_err(|e| ReportError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;

        debug!(path = %self.path.display(), "Report written");
        Ok(())
    }
}
