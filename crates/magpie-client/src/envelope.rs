//! The backend's uniform response shape.

use serde::Deserialize;
use serde_json::Value;

/// Every endpoint answers `{success, message, data}`; the login endpoint may
/// additionally carry a `token` sibling. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
}

impl ApiEnvelope {
    /// Returns `data` rendered as text: strings verbatim, anything else as
    /// its JSON representation.
    pub fn data_text(&self) -> Option<String> {
        match &self.data {
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }

    /// Returns the bearer token from a login response. Backends return it
    /// either as a `token` field or as a bare `data` string.
    pub fn bearer_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(|| self.data_text().filter(|token| !token.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_field_wins_over_data() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":true,"token":"tok-a","data":"tok-b"}"#).unwrap();
        assert_eq!(envelope.bearer_token(), Some("tok-a".to_string()));
    }

    #[test]
    fn token_falls_back_to_data_string() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":true,"data":"tok-b"}"#).unwrap();
        assert_eq!(envelope.bearer_token(), Some("tok-b".to_string()));
    }

    #[test]
    fn missing_fields_default() {
        let envelope: ApiEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, None);
        assert_eq!(envelope.data_text(), None);
        assert_eq!(envelope.bearer_token(), None);
    }

    #[test]
    fn non_string_data_renders_as_json() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":true,"data":{"pages":3}}"#).unwrap();
        assert_eq!(envelope.data_text(), Some(r#"{"pages":3}"#.to_string()));
    }
}
