//! `{{name}}` placeholders and the per-scenario capture store.
//!
//! Values captured by earlier steps of a scenario are substituted into the
//! URL, header values, body and expected JSON of later steps.

use std::collections::HashMap;
use std::ops::Range;

use probe_domain::Spec;
use probe_domain::request::RequestBody;
use serde_json::{Map, Value};

use crate::error::{StepError, StepResult};

/// A `{{name}}` reference found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The capture name, without braces or surrounding whitespace.
    pub name: String,

    /// Byte range of the whole `{{...}}` in the source string.
    pub span: Range<usize>,
}

/// Extracts every placeholder from `input`, in order.
///
/// Unterminated `{{` and empty names are ignored.
///
/// ```
/// use probe_application::variables::parse_placeholders;
///
/// let refs = parse_placeholders("/objects/{{id}}?v={{ version }}");
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "id");
/// assert_eq!(refs[1].name, "version");
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut rest = input;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let name = after_open[..close].trim();
        let start = offset + open;
        let end = start + 2 + close + 2;
        if !name.is_empty() {
            found.push(Placeholder {
                name: name.to_string(),
                span: start..end,
            });
        }
        offset = end;
        rest = &input[end..];
    }

    found
}

/// Returns true if `input` contains at least one placeholder.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    !parse_placeholders(input).is_empty()
}

/// Values captured during one scenario, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures {
    values: HashMap<String, Value>,
}

impl Captures {
    /// Creates an empty capture store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any earlier value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns the captured value, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the captured value.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` if nothing was captured under `name`.
    pub fn require(&self, name: &str) -> StepResult<&Value> {
        self.get(name).ok_or_else(|| StepError::missing_input(name))
    }

    /// Returns the number of captured values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitutes every placeholder in `input` with the text of its value.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` for the first unknown name.
    pub fn resolve_str(&self, input: &str) -> StepResult<String> {
        let placeholders = parse_placeholders(input);
        self.interpolate(input, &placeholders)
    }

    /// Resolves placeholders inside every string of a JSON document.
    ///
    /// A string that is exactly one placeholder is replaced by the captured
    /// value itself, keeping its JSON type.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` for the first unknown name.
    pub fn resolve_value(&self, value: &Value) -> StepResult<Value> {
        match value {
            Value::String(text) => self.resolve_json_string(text),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item))
                .collect::<StepResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(fields) => fields
                .iter()
                .map(|(key, item)| Ok((key.clone(), self.resolve_value(item)?)))
                .collect::<StepResult<Map<_, _>>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }

    /// Returns a copy of `spec` with all placeholders resolved.
    ///
    /// Covers the URL, header values, body and expected JSON documents.
    ///
    /// # Errors
    ///
    /// Returns `StepError::MissingInput` for the first unknown name.
    pub fn resolve_spec(&self, spec: &Spec) -> StepResult<Spec> {
        let mut resolved = spec.clone();
        let request = &mut resolved.request;

        request.url = self.resolve_str(&request.url)?;
        for header in request.headers.iter_mut() {
            header.value = self.resolve_str(&header.value)?;
        }
        match &mut request.body {
            RequestBody::None => {}
            RequestBody::Json(body) => *body = self.resolve_value(body)?,
            RequestBody::Text { content, .. } => *content = self.resolve_str(content)?,
        }
        for expectation in &mut resolved.expectations {
            if let Some(expected) = expectation.expected_json_mut() {
                *expected = self.resolve_value(expected)?;
            }
        }

        Ok(resolved)
    }

    fn resolve_json_string(&self, text: &str) -> StepResult<Value> {
        let placeholders = parse_placeholders(text);
        if let [only] = placeholders.as_slice()
            && only.span == (0..text.len())
        {
            return self.require(&only.name).cloned();
        }
        self.interpolate(text, &placeholders).map(Value::String)
    }

    fn interpolate(&self, input: &str, placeholders: &[Placeholder]) -> StepResult<String> {
        if placeholders.is_empty() {
            return Ok(input.to_string());
        }

        let mut output = String::with_capacity(input.len());
        let mut last = 0;
        for placeholder in placeholders {
            output.push_str(&input[last..placeholder.span.start]);
            match self.require(&placeholder.name)? {
                Value::String(text) => output.push_str(text),
                other => output.push_str(&other.to_string()),
            }
            last = placeholder.span.end;
        }
        output.push_str(&input[last..]);

        Ok(output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use probe_domain::{Expectation, spec};
    use serde_json::json;

    fn captures() -> Captures {
        let mut captures = Captures::new();
        captures.insert("id", json!("ff808181932badb6"));
        captures.insert("year", json!(2019));
        captures
    }

    #[test]
    fn test_parse_single_placeholder() {
        let refs = parse_placeholders("{{id}}");
        assert_eq!(
            refs,
            vec![Placeholder {
                name: "id".to_string(),
                span: 0..6
            }]
        );
    }

    #[test]
    fn test_parse_ignores_unterminated_and_empty() {
        assert!(parse_placeholders("{{id").is_empty());
        assert!(parse_placeholders("{{  }}").is_empty());
        assert!(parse_placeholders("{id}").is_empty());
        assert!(!has_placeholders("plain text"));
    }

    #[test]
    fn test_parse_adjacent_and_spans() {
        let input = "{{a}}{{b}}/x/{{ c }}";
        let refs = parse_placeholders(input);
        let names: Vec<_> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(&input[refs[2].span.clone()], "{{ c }}");
    }

    #[test]
    fn test_resolve_str_interpolates_text() {
        let url = captures()
            .resolve_str("https://api.restful-api.dev/objects/{{id}}?year={{year}}")
            .unwrap();
        assert_eq!(
            url,
            "https://api.restful-api.dev/objects/ff808181932badb6?year=2019"
        );
    }

    #[test]
    fn test_resolve_str_missing_name() {
        let err = captures().resolve_str("/objects/{{nope}}").unwrap_err();
        assert!(matches!(err, StepError::MissingInput { ref name } if name == "nope"));
    }

    #[test]
    fn test_exact_placeholder_keeps_json_type() {
        let value = captures()
            .resolve_value(&json!({"data": {"year": "{{year}}", "label": "year {{year}}"}}))
            .unwrap();
        assert_eq!(value, json!({"data": {"year": 2019, "label": "year 2019"}}));
    }

    #[test]
    fn test_resolve_spec_covers_request_and_expectations() {
        let template = spec()
            .get("https://api.restful-api.dev/objects/{{id}}")
            .with_header("X-Object", "{{id}}")
            .expect_json_like(json!({"id": "{{id}}"}))
            .build()
            .unwrap();

        let resolved = captures().resolve_spec(&template).unwrap();

        assert_eq!(
            resolved.request.url,
            "https://api.restful-api.dev/objects/ff808181932badb6"
        );
        assert_eq!(
            resolved.request.headers.get("x-object"),
            Some("ff808181932badb6")
        );
        assert_eq!(
            resolved.expectations,
            vec![Expectation::JsonLike {
                expected: json!({"id": "ff808181932badb6"})
            }]
        );
    }

    #[test]
    fn test_resolve_spec_without_placeholders_is_identity() {
        let template = spec()
            .post("https://api.restful-api.dev/objects")
            .with_json(json!({"name": "Apple MacBook Pro 16"}))
            .build()
            .unwrap();
        assert_eq!(Captures::new().resolve_spec(&template).unwrap(), template);
    }
}
