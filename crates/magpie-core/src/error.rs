//! Error types for the Magpie client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Magpie client.
///
/// This provides typed, structured error variants with constructor helpers
/// so callers can classify failures (validation vs. transport vs. auth)
/// without string matching.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MagpieError {
    /// Client-side validation failure. The message is user-facing and is
    /// shown verbatim; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// Configuration error (missing home directory, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error (token file read/write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Transport error (connect failure, timeout, unreadable response)
    #[error("Transport error: {message}")]
    Transport { message: String, timeout: bool },

    /// The server rejected the request with 401; the stored token has
    /// already been evicted by the time this error reaches the caller.
    #[error("authentication required")]
    Unauthorized,

    /// The server answered but reported failure; carries its message.
    #[error("{0}")]
    Api(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MagpieError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>, timeout: bool) -> Self {
        Self::Transport {
            message: message.into(),
            timeout,
        }
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a timed-out transport error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = MagpieError::validation("Please enter a valid URL");
        assert_eq!(err.to_string(), "Please enter a valid URL");
        assert!(err.is_validation());
    }

    #[test]
    fn timeout_flag_is_preserved() {
        let err = MagpieError::transport("request timed out", true);
        assert!(err.is_timeout());
        let err = MagpieError::transport("connection refused", false);
        assert!(!err.is_timeout());
    }
}
