//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Field order follows the declaration order of the source types
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use probe_domain::TestOutcome;

    #[test]
    fn test_trailing_newline_and_two_space_indent() {
        let json = to_json_stable(&TestOutcome::passed("list objects", 12)).unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"name\": \"list objects\""));
    }

    #[test]
    fn test_same_value_same_output() {
        let outcome = TestOutcome::passed("create then get", 40);
        assert_eq!(
            to_json_stable(&outcome).unwrap(),
            to_json_stable(&outcome.clone()).unwrap()
        );
    }
}
