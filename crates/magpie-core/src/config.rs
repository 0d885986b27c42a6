//! Client configuration.
//!
//! The backend address comes from `config.toml`, overridable via the
//! `MAGPIE_BACKEND_URL` environment variable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend address used when neither the config file nor the environment
/// provides one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Environment variable that overrides the configured backend address.
pub const BACKEND_URL_ENV: &str = "MAGPIE_BACKEND_URL";

/// Per-request timeout in seconds. A stalled call is aborted after this and
/// surfaced as a transport failure.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Applies the `MAGPIE_BACKEND_URL` override, if set and non-empty.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.backend_url = url.to_string();
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);

        let config: AppConfig =
            toml::from_str("backend_url = \"https://kb.internal:9090\"").unwrap();
        assert_eq!(config.backend_url, "https://kb.internal:9090");
        assert_eq!(config.timeout_secs, REQUEST_TIMEOUT_SECS);
    }
}
