//! Harness configuration

use serde::{Deserialize, Serialize};

/// Timeout applied to every request that does not set its own.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Settings shared by every spec a harness executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Timeout in milliseconds for specs without an explicit timeout.
    pub default_timeout_ms: u64,
    /// Base URL that relative spec URLs (starting with `/`) are joined to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            base_url: None,
        }
    }
}

impl HarnessConfig {
    /// Sets the base URL for relative spec URLs.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the default request timeout.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }
}
