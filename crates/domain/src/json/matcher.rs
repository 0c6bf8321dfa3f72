//! Structural partial matching of JSON documents.

use std::fmt;

use serde_json::Value;

/// The first place where an actual document failed to contain the expected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonMismatch {
    /// Location of the mismatch, rooted at `$`.
    pub path: String,
    /// Expected value at that location.
    pub expected: String,
    /// Actual value at that location, or `<missing>`.
    pub actual: String,
}

impl fmt::Display for JsonMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at {}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Checks that `actual` structurally contains `expected`.
///
/// Objects match when every expected key is present and matches; extra keys
/// in `actual` are ignored. Arrays match element by element on the indexes
/// present in `expected`. Numbers compare numerically; other scalars must be
/// equal.
///
/// # Errors
///
/// Returns the first [`JsonMismatch`] found, in document order.
pub fn json_like(expected: &Value, actual: &Value) -> Result<(), JsonMismatch> {
    match_at("$", expected, actual)
}

fn match_at(path: &str, expected: &Value, actual: &Value) -> Result<(), JsonMismatch> {
    match (expected, actual) {
        (Value::Object(expected_map), Value::Object(actual_map)) => {
            for (key, expected_value) in expected_map {
                let child = child_key(path, key);
                match actual_map.get(key) {
                    Some(actual_value) => match_at(&child, expected_value, actual_value)?,
                    None => return Err(mismatch(child, expected_value, None)),
                }
            }
            Ok(())
        }
        (Value::Array(expected_items), Value::Array(actual_items)) => {
            for (index, expected_item) in expected_items.iter().enumerate() {
                let child = format!("{path}[{index}]");
                match actual_items.get(index) {
                    Some(actual_item) => match_at(&child, expected_item, actual_item)?,
                    None => return Err(mismatch(child, expected_item, None)),
                }
            }
            Ok(())
        }
        (Value::Number(e), Value::Number(a)) => {
            #[allow(clippy::float_cmp)]
            let same = e == a || e.as_f64() == a.as_f64();
            if same {
                Ok(())
            } else {
                Err(mismatch(path.to_string(), expected, Some(actual)))
            }
        }
        _ if expected == actual => Ok(()),
        _ => Err(mismatch(path.to_string(), expected, Some(actual))),
    }
}

fn child_key(path: &str, key: &str) -> String {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if plain {
        format!("{path}.{key}")
    } else {
        format!("{path}[\"{key}\"]")
    }
}

fn mismatch(path: String, expected: &Value, actual: Option<&Value>) -> JsonMismatch {
    JsonMismatch {
        path,
        expected: expected.to_string(),
        actual: actual.map_or_else(|| "<missing>".to_string(), ToString::to_string),
    }
}
