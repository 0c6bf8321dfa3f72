//! Suite settings read from the environment.

use std::path::PathBuf;

use probe_application::HarnessConfig;
use thiserror::Error;
use url::Url;

/// Base URL of the public Objects API.
pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "OBJECTS_API_BASE_URL";
/// Environment variable overriding the default request timeout (ms).
pub const TIMEOUT_VAR: &str = "OBJECTS_API_TIMEOUT_MS";
/// Environment variable naming a JSON report file.
pub const REPORT_VAR: &str = "OBJECTS_API_REPORT";

/// Invalid suite settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The base URL is not an absolute http(s) URL.
    #[error("OBJECTS_API_BASE_URL: invalid base URL '{value}': {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The timeout is not a positive number of milliseconds.
    #[error("OBJECTS_API_TIMEOUT_MS: invalid timeout '{value}': {reason}")]
    InvalidTimeout {
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Settings for one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL scenario paths are joined to.
    pub base_url: String,
    /// Default request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Where to write the JSON report, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: HarnessConfig::default().default_timeout_ms,
            report_path: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(value) = get(BASE_URL_VAR) {
            let parsed = Url::parse(&value).map_err(|e| SettingsError::InvalidBaseUrl {
                value: value.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SettingsError::InvalidBaseUrl {
                    value,
                    reason: "scheme must be http or https".to_string(),
                });
            }
            settings.base_url = value.trim_end_matches('/').to_string();
        }

        if let Some(value) = get(TIMEOUT_VAR) {
            settings.timeout_ms = match value.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(SettingsError::InvalidTimeout {
                        value,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(ms) => ms,
                Err(e) => {
                    return Err(SettingsError::InvalidTimeout {
                        value,
                        reason: e.to_string(),
                    });
                }
            };
        }

        settings.report_path = get(REPORT_VAR).map(PathBuf::from);

        Ok(settings)
    }

    /// Returns the harness configuration for these settings.
    #[must_use]
    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig::default()
            .with_base_url(self.base_url.clone())
            .with_default_timeout(self.timeout_ms)
    }
}
