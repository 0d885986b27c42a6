pub mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod token;
pub mod validate;

// Re-export common error type
pub use error::MagpieError;
