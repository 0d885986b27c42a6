//! Shared HTTP pipeline for authenticated endpoints.
//!
//! Centralizing token injection and 401 handling here means every service
//! gets consistent session-expiry behavior without per-call boilerplate.

use crate::envelope::ApiEnvelope;
use magpie_core::MagpieError;
use magpie_core::config::AppConfig;
use magpie_core::token::TokenStore;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Navigation port invoked after a 401 evicts the stored token.
///
/// The HTTP layer has no idea what "go to the login view" means for the
/// frontend in use; whoever constructs the client injects that behavior.
pub trait UnauthorizedHook: Send + Sync {
    fn on_unauthorized(&self);
}

/// The shared request/response pipeline used by the chat and knowledge
/// services.
///
/// Before every request the token store is consulted and, when it holds a
/// token, `Authorization: Bearer <token>` is attached. Any 401 response
/// evicts the token, fires the unauthorized hook, and still surfaces
/// [`MagpieError::Unauthorized`] to the caller.
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHook>>,
}

pub(crate) fn build_http(config: &AppConfig) -> Result<Client, MagpieError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Client::builder()
        .default_headers(headers)
        .timeout(config.timeout())
        .build()
        .map_err(|err| MagpieError::internal(format!("failed to build HTTP client: {err}")))
}

pub(crate) fn base_url_of(config: &AppConfig) -> String {
    config.backend_url.trim_end_matches('/').to_string()
}

pub(crate) fn transport_error(context: &str, err: &reqwest::Error) -> MagpieError {
    MagpieError::transport(format!("{context}: {err}"), err.is_timeout())
}

impl ApiClient {
    pub fn new(config: &AppConfig, store: Arc<dyn TokenStore>) -> Result<Self, MagpieError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: base_url_of(config),
            store,
            on_unauthorized: None,
        })
    }

    /// Installs the hook fired after a 401 eviction.
    pub fn with_unauthorized_hook(mut self, hook: Arc<dyn UnauthorizedHook>) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope, MagpieError> {
        let request = self.http.post(self.endpoint(path)).json(body);
        self.dispatch(request).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
    ) -> Result<ApiEnvelope, MagpieError> {
        let request = self.http.post(self.endpoint(path)).multipart(form);
        self.dispatch(request).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<ApiEnvelope, MagpieError> {
        let request = match self.store.get()? {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| transport_error("request failed", &err))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.evict_session();
            return Err(MagpieError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .map_err(|err| transport_error("failed to read response body", &err))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("server returned {status}"));
            return Err(MagpieError::api(message));
        }

        serde_json::from_str(&body)
            .map_err(|err| MagpieError::internal(format!("failed to parse response: {err}")))
    }

    fn evict_session(&self) {
        tracing::warn!("received 401, evicting stored token");
        if let Err(err) = self.store.remove() {
            tracing::warn!("failed to clear stored token: {err}");
        }
        if let Some(hook) = &self.on_unauthorized {
            hook.on_unauthorized();
        }
    }
}
