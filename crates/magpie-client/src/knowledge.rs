//! Knowledge ingestion: URL submission and PDF upload.

use crate::client::ApiClient;
use magpie_core::MagpieError;
use magpie_core::validate::PdfCandidate;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a str>,
}

/// Outcome of an accepted ingestion request; `message` is the server's
/// status line, shown to the operator when present.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub message: Option<String>,
}

/// Submits URLs and PDF files to the two ingestion endpoints.
pub struct KnowledgeService {
    client: Arc<ApiClient>,
}

impl KnowledgeService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Submits a URL for ingestion. The URL is sent trimmed; syntactic
    /// validity is checked by the caller before invocation
    /// (`magpie_core::validate::normalize_url`).
    pub async fn submit_url(
        &self,
        url: &str,
        selector: Option<&str>,
    ) -> Result<IngestOutcome, MagpieError> {
        let url = url.trim();
        let envelope = self
            .client
            .post_json("/knowledge/web", &UrlRequest { url, selector })
            .await?;
        Self::into_outcome(envelope.success, envelope.message, "URL submission")
    }

    /// Uploads a PDF as a multipart body under the field name `file`.
    ///
    /// The preflight (MIME type, size cap) runs again here so a violation
    /// can never reach the network, even if a caller skipped its own check.
    pub async fn upload_pdf(&self, pdf: &PdfCandidate) -> Result<IngestOutcome, MagpieError> {
        pdf.validate()?;

        let bytes = tokio::fs::read(&pdf.path).await.map_err(|err| {
            MagpieError::storage(format!("cannot read {}: {err}", pdf.path.display()))
        })?;
        let part = Part::bytes(bytes)
            .file_name(pdf.name.clone())
            .mime_str(&pdf.mime)
            .map_err(|err| MagpieError::internal(format!("invalid MIME type: {err}")))?;
        let form = Form::new().part("file", part);

        let envelope = self.client.post_multipart("/knowledge/upload", form).await?;
        Self::into_outcome(envelope.success, envelope.message, "PDF upload")
    }

    fn into_outcome(
        success: bool,
        message: Option<String>,
        what: &str,
    ) -> Result<IngestOutcome, MagpieError> {
        if !success {
            return Err(MagpieError::api(
                message.unwrap_or_else(|| format!("{what} rejected")),
            ));
        }
        Ok(IngestOutcome { message })
    }
}
