//! Report sinks.

mod console;
mod json_file;

pub use console::ConsoleReportSink;
pub use json_file::JsonFileReportSink;
