//! Bearer token storage.
//!
//! The trait lives here so the HTTP layer can read tokens without knowing
//! where they persist; the file-backed implementation lives in
//! `magpie-infrastructure`.

use crate::error::MagpieError;
use std::sync::RwLock;

/// Persistent storage for the single bearer token.
///
/// At most one token exists at a time. Absence means "unauthenticated".
/// A token is trusted until the server rejects it; there is no expiry logic
/// on the client side.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` when unauthenticated.
    fn get(&self) -> Result<Option<String>, MagpieError>;

    /// Replaces the stored token. Empty tokens are rejected.
    fn set(&self, token: &str) -> Result<(), MagpieError>;

    /// Removes the stored token. Removing an absent token is a no-op.
    fn remove(&self) -> Result<(), MagpieError>;
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, MagpieError> {
        Ok(self.token.read().unwrap().clone())
    }

    fn set(&self, token: &str) -> Result<(), MagpieError> {
        if token.is_empty() {
            return Err(MagpieError::validation("token must not be empty"));
        }
        *self.token.write().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), MagpieError> {
        *self.token.write().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.set("tok-123").unwrap();
        assert_eq!(store.get().unwrap(), Some("tok-123".to_string()));

        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn empty_token_is_rejected() {
        let store = MemoryTokenStore::new();
        assert!(store.set("").is_err());
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.set("tok").unwrap();
        store.remove().unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }
}
