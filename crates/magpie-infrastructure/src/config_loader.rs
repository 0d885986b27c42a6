//! Configuration file loading.
//!
//! A missing file is not an error; the defaults point at a local backend.

use crate::paths::MagpiePaths;
use magpie_core::MagpieError;
use magpie_core::config::AppConfig;
use std::fs;
use std::path::Path;

/// Loads `config.toml` from the given path, or from the default location
/// when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<AppConfig, MagpieError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => MagpiePaths::config_file()?,
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|err| {
        MagpieError::config(format!("Failed to read {}: {err}", path.display()))
    })?;
    toml::from_str(&content).map_err(|err| {
        MagpieError::config(format!("Failed to parse {}: {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use magpie_core::config::DEFAULT_BACKEND_URL;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = \"http://kb.lan:8080\"\ntimeout_secs = 10\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.backend_url, "http://kb.lan:8080");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = [not toml").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(matches!(err, MagpieError::Config(_)));
    }
}
