//! Chat endpoint wrapper.

use crate::client::ApiClient;
use magpie_core::MagpieError;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Answer returned by the backend for one question.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub answer: String,
}

/// Sends a user message to the chat endpoint and returns the reply text.
///
/// Single request/response; no retry, no streaming, no cancellation of
/// in-flight requests. Duplicate submission is the caller's problem (the
/// REPL awaits each send before reading the next line).
pub struct ChatService {
    client: Arc<ApiClient>,
}

impl ChatService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn send(&self, message: &str) -> Result<ChatReply, MagpieError> {
        let envelope = self
            .client
            .post_json("/chat", &ChatRequest { message })
            .await?;

        if !envelope.success {
            return Err(MagpieError::api(
                envelope
                    .message
                    .unwrap_or_else(|| "chat request rejected".to_string()),
            ));
        }

        let answer = envelope
            .data_text()
            .unwrap_or_else(|| "No response from server".to_string());
        Ok(ChatReply { answer })
    }
}
