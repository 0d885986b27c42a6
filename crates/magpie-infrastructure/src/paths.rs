//! Unified path management for magpie's persisted files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/magpie/            # Config directory
//! ├── config.toml              # Backend address and timeouts
//! └── token.json               # Stored bearer token
//! ```

use magpie_core::MagpieError;
use std::path::PathBuf;

/// Unified path management for magpie.
pub struct MagpiePaths;

impl MagpiePaths {
    /// Returns the magpie configuration directory: `~/.config/magpie/`.
    pub fn config_dir() -> Result<PathBuf, MagpieError> {
        let home = dirs::home_dir()
            .ok_or_else(|| MagpieError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("magpie"))
    }

    /// Returns the path of the token file.
    pub fn token_file() -> Result<PathBuf, MagpieError> {
        Ok(Self::config_dir()?.join("token.json"))
    }

    /// Returns the path of the configuration file.
    pub fn config_file() -> Result<PathBuf, MagpieError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_config_dir() {
        let dir = MagpiePaths::config_dir().unwrap();
        assert!(MagpiePaths::token_file().unwrap().starts_with(&dir));
        assert!(MagpiePaths::config_file().unwrap().starts_with(&dir));
        assert!(dir.ends_with(".config/magpie"));
    }
}
