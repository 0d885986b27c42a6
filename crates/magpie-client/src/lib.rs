//! HTTP surface of the magpie client.
//!
//! One [`client::ApiClient`] is shared by the chat and knowledge services;
//! it injects the stored bearer token into every request and evicts it on a
//! 401. Login goes through [`auth::AuthService`], which deliberately runs on
//! a plain client so an invalid-credentials 401 cannot trigger the global
//! eviction path.

pub mod auth;
pub mod chat;
pub mod client;
pub mod envelope;
pub mod knowledge;

pub use auth::{AuthService, LoginOutcome};
pub use chat::{ChatReply, ChatService};
pub use client::{ApiClient, UnauthorizedHook};
pub use envelope::ApiEnvelope;
pub use knowledge::{IngestOutcome, KnowledgeService};
