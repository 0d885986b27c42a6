//! File-backed token storage.
//!
//! The token lives in a single JSON file under the magpie config directory.
//! Writes are atomic: the record is written to a temp file, fsynced, then
//! renamed over the target, so a crash mid-write never leaves a torn file.

use crate::paths::MagpiePaths;
use magpie_core::MagpieError;
use magpie_core::token::TokenStore;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    access_token: String,
}

/// [`TokenStore`] implementation persisting to `~/.config/magpie/token.json`.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location.
    pub fn new() -> Result<Self, MagpieError> {
        Ok(Self {
            path: MagpiePaths::token_file()?,
        })
    }

    /// Creates a store at an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn write_atomic(&self, record: &TokenRecord) -> Result<(), MagpieError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                MagpieError::storage(format!("cannot create {}: {err}", parent.display()))
            })?;
        }

        let payload = serde_json::to_string_pretty(record)
            .map_err(|err| MagpieError::storage(format!("cannot encode token: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp).map_err(|err| {
                MagpieError::storage(format!("cannot create {}: {err}", tmp.display()))
            })?;
            file.write_all(payload.as_bytes()).map_err(|err| {
                MagpieError::storage(format!("cannot write {}: {err}", tmp.display()))
            })?;
            file.sync_all().map_err(|err| {
                MagpieError::storage(format!("cannot sync {}: {err}", tmp.display()))
            })?;
        }
        fs::rename(&tmp, &self.path).map_err(|err| {
            MagpieError::storage(format!("cannot rename into {}: {err}", self.path.display()))
        })
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>, MagpieError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|err| {
            MagpieError::storage(format!("cannot read {}: {err}", self.path.display()))
        })?;
        let record: TokenRecord = serde_json::from_str(&content).map_err(|err| {
            MagpieError::storage(format!("cannot parse {}: {err}", self.path.display()))
        })?;
        Ok(Some(record.access_token).filter(|token| !token.is_empty()))
    }

    fn set(&self, token: &str) -> Result<(), MagpieError> {
        if token.is_empty() {
            return Err(MagpieError::validation("token must not be empty"));
        }
        self.write_atomic(&TokenRecord {
            access_token: token.to_string(),
        })
    }

    fn remove(&self) -> Result<(), MagpieError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(MagpieError::storage(format!(
                "cannot remove {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::with_path(dir.path().join("token.json"))
    }

    #[test]
    fn missing_file_reads_as_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_get_remove_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("tok-123").unwrap();
        assert_eq!(store.get().unwrap(), Some("tok-123".to_string()));

        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn token_survives_a_new_store_instance() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set("persisted").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get().unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn remove_of_missing_file_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.remove().unwrap();
        store.remove().unwrap();
    }

    #[test]
    fn set_overwrites_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("first").unwrap();
        store.set("second").unwrap();
        assert_eq!(store.get().unwrap(), Some("second".to_string()));
    }
}
