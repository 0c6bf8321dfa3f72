//! HTTP request body types

use serde::{Deserialize, Serialize};

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document, serialized when the request is sent
    Json(serde_json::Value),
    /// Raw text body with an explicit content type
    Text {
        /// The content type (e.g., "text/plain")
        content_type: String,
        /// The body content
        content: String,
    },
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content_type: "text/plain".to_string(),
            content: content.into(),
        }
    }

    /// Returns whether there is no body to send.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
            Self::Text { content_type, .. } => Some(content_type),
        }
    }

    /// Returns the bytes that go on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON body cannot be serialized.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Self::None => Ok(Vec::new()),
            Self::Json(value) => serde_json::to_vec(value),
            Self::Text { content, .. } => Ok(content.as_bytes().to_vec()),
        }
    }
}
