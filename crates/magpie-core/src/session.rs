//! Authenticated session state.
//!
//! `SessionContext` is the single writer for token transitions. It is
//! explicitly constructed with a token store and passed to whoever needs it;
//! there is no ambient singleton.

use crate::error::MagpieError;
use crate::token::TokenStore;
use std::sync::{Arc, RwLock};

/// In-memory view of the authenticated session, backed by a [`TokenStore`].
///
/// The in-memory state is rehydrated from the store once at construction and
/// updated store-first on every transition, so the persistent and in-memory
/// views agree before callers observe the result. The one exception is a 401
/// eviction inside the HTTP layer, which clears the store before the session
/// hook runs; that brief divergence is accepted.
pub struct SessionContext {
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<String>>,
}

impl SessionContext {
    /// Builds a session from whatever the store currently holds.
    pub fn new(store: Arc<dyn TokenStore>) -> Result<Self, MagpieError> {
        let existing = store.get()?;
        if existing.is_some() {
            tracing::debug!("restored session from stored token");
        }
        Ok(Self {
            store,
            token: RwLock::new(existing),
        })
    }

    /// Persists the token, then marks the session authenticated.
    pub fn login(&self, token: &str) -> Result<(), MagpieError> {
        self.store.set(token)?;
        *self.token.write().unwrap() = Some(token.to_string());
        Ok(())
    }

    /// Clears the stored token, then the in-memory state.
    ///
    /// Calling this on an unauthenticated session is a no-op.
    pub fn logout(&self) -> Result<(), MagpieError> {
        self.store.remove()?;
        *self.token.write().unwrap() = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    /// Returns the current token, failing fast when unauthenticated so
    /// misuse surfaces during development instead of as a silent default.
    pub fn require_token(&self) -> Result<String, MagpieError> {
        self.token().ok_or(MagpieError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    fn session_with_store() -> (Arc<MemoryTokenStore>, SessionContext) {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone()).unwrap();
        (store, session)
    }

    #[test]
    fn login_round_trip() {
        let (store, session) = session_with_store();
        assert!(!session.is_authenticated());

        session.login("tok-42").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-42".to_string()));
        assert_eq!(store.get().unwrap(), Some("tok-42".to_string()));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn logout_twice_matches_logout_once() {
        let (store, session) = session_with_store();
        session.login("tok").unwrap();

        session.logout().unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn rehydrates_from_existing_token() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("persisted").unwrap();

        let session = SessionContext::new(store).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("persisted".to_string()));
    }

    #[test]
    fn require_token_fails_fast_when_logged_out() {
        let (_, session) = session_with_store();
        let err = session.require_token().unwrap_err();
        assert!(err.is_unauthorized());
    }
}
