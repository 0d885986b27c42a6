//! Login against the admin auth endpoint.

use crate::client::{base_url_of, build_http, transport_error};
use crate::envelope::ApiEnvelope;
use magpie_core::MagpieError;
use magpie_core::config::AppConfig;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub message: Option<String>,
}

/// Issues login calls on its own client instance, without the 401-eviction
/// hook. Login itself legitimately answers 401 for bad credentials, which
/// must not tear down an unrelated stored session or loop the caller back
/// through the eviction path.
pub struct AuthService {
    http: Client,
    base_url: String,
}

impl AuthService {
    pub fn new(config: &AppConfig) -> Result<Self, MagpieError> {
        Ok(Self {
            http: build_http(config)?,
            base_url: base_url_of(config),
        })
    }

    /// Exchanges credentials for a bearer token. Transport failures
    /// propagate; there is no retry.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, MagpieError> {
        let response = self
            .http
            .post(format!("{}/auth/loginAdmin", self.base_url))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|err| transport_error("login request failed", &err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport_error("failed to read login response", &err))?;
        let envelope = serde_json::from_str::<ApiEnvelope>(&body).ok();

        if !status.is_success() {
            let message = envelope
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("login failed with status {status}"));
            return Err(MagpieError::api(message));
        }

        let envelope = envelope
            .ok_or_else(|| MagpieError::internal("login response was not valid JSON"))?;
        if !envelope.success {
            return Err(MagpieError::api(
                envelope
                    .message
                    .unwrap_or_else(|| "login rejected".to_string()),
            ));
        }

        let token = envelope
            .bearer_token()
            .ok_or_else(|| MagpieError::api("login response did not include a token"))?;
        Ok(LoginOutcome {
            token,
            message: envelope.message,
        })
    }
}
