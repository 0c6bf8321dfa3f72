//! Field paths into parsed JSON bodies.
//!
//! Accepted syntax: `id`, `data.price`, `items[0].id`, `data["CPU model"]`,
//! each optionally prefixed with `$` or `$.`. A bare `$` addresses the root.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member lookup.
    Key(String),
    /// Array element lookup.
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` for empty paths, empty segments,
    /// unterminated brackets and non-numeric indexes.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let raw = input.trim();
        let err = |reason: &str| DomainError::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(err("path is empty"));
        }

        let body = match raw.strip_prefix('$') {
            Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
            None => raw,
        };

        let chars: Vec<char> = body.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;
        let mut expect_key = true;

        while i < chars.len() {
            match chars[i] {
                '[' => {
                    if i > 0 && chars[i - 1] == '.' {
                        return Err(err("'[' after '.'"));
                    }
                    i += 1;
                    match chars.get(i) {
                        Some(&quote @ ('"' | '\'')) => {
                            i += 1;
                            let start = i;
                            while i < chars.len() && chars[i] != quote {
                                i += 1;
                            }
                            if i >= chars.len() {
                                return Err(err("unterminated quoted key"));
                            }
                            let key: String = chars[start..i].iter().collect();
                            i += 1;
                            if chars.get(i) != Some(&']') {
                                return Err(err("expected ']' after quoted key"));
                            }
                            i += 1;
                            segments.push(PathSegment::Key(key));
                        }
                        _ => {
                            let start = i;
                            while i < chars.len() && chars[i] != ']' {
                                i += 1;
                            }
                            if i >= chars.len() {
                                return Err(err("unterminated index"));
                            }
                            let digits: String = chars[start..i].iter().collect();
                            let index = digits.trim().parse::<usize>().map_err(|_| {
                                err(&format!("invalid array index '{digits}'"))
                            })?;
                            i += 1;
                            segments.push(PathSegment::Index(index));
                        }
                    }
                    expect_key = false;
                }
                '.' => {
                    if expect_key {
                        return Err(err("empty segment"));
                    }
                    i += 1;
                    if i == chars.len() {
                        return Err(err("path ends with '.'"));
                    }
                    expect_key = true;
                }
                _ => {
                    if !expect_key {
                        return Err(err("expected '.' or '[' between segments"));
                    }
                    let start = i;
                    while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                        i += 1;
                    }
                    segments.push(PathSegment::Key(chars[start..i].iter().collect()));
                    expect_key = false;
                }
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if the path addresses the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Looks up the value at this path.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match segment {
                PathSegment::Key(key) => current.as_object()?.get(key),
                PathSegment::Index(index) => current.as_array()?.get(*index),
            })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for JsonPath {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JsonPath {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::parse(&value)
    }
}

impl From<JsonPath> for String {
    fn from(path: JsonPath) -> Self {
        path.raw
    }
}
