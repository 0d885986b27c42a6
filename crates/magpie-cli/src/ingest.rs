//! URL and PDF submission flows shared by the one-shot subcommands and the
//! REPL slash commands.
//!
//! Validation runs before any network call; a rejected input means no
//! request was issued and the selection is simply dropped.

use crate::status::UploadTracker;
use colored::Colorize;
use magpie_client::KnowledgeService;
use magpie_core::MagpieError;
use magpie_core::validate::{PdfCandidate, normalize_url};
use std::path::Path;

pub async fn submit_url_flow(
    knowledge: &KnowledgeService,
    tracker: &UploadTracker,
    raw: &str,
    selector: Option<&str>,
) -> Result<(), MagpieError> {
    let url = match normalize_url(raw) {
        Ok(url) => url,
        Err(err) => {
            println!("{}", err.to_string().yellow());
            return Err(err);
        }
    };

    tracker.begin();
    println!("{}", "Processing URL...".bright_black());

    match knowledge.submit_url(&url, selector).await {
        Ok(outcome) => {
            let message = outcome.message.unwrap_or_else(|| {
                "URL processed successfully! The content has been added to the knowledge base."
                    .to_string()
            });
            tracker.succeed(message.clone());
            println!("{}", message.green());
            Ok(())
        }
        Err(err) => {
            let shown = if err.is_unauthorized() {
                "Session expired. Please log in again."
            } else {
                "Failed to process URL. Please try again."
            };
            tracker.fail(shown);
            println!("{}", shown.red());
            tracing::debug!("url submission failed: {err}");
            Err(err)
        }
    }
}

pub async fn upload_pdf_flow(
    knowledge: &KnowledgeService,
    tracker: &UploadTracker,
    path: &Path,
) -> Result<(), MagpieError> {
    let pdf = match PdfCandidate::from_path(path) {
        Ok(pdf) => pdf,
        Err(err) => {
            println!("{}", err.to_string().yellow());
            return Err(err);
        }
    };
    if let Err(err) = pdf.validate() {
        println!("{}", err.to_string().yellow());
        return Err(err);
    }

    tracker.begin();
    println!("{}", "Uploading and processing PDF...".bright_black());

    match knowledge.upload_pdf(&pdf).await {
        Ok(outcome) => {
            let message = outcome.message.unwrap_or_else(|| {
                "PDF uploaded successfully! The content has been added to the knowledge base."
                    .to_string()
            });
            tracker.succeed(message.clone());
            println!("{}", message.green());
            Ok(())
        }
        Err(err) => {
            let shown = if err.is_unauthorized() {
                "Session expired. Please log in again."
            } else {
                "Failed to upload PDF. Please try again."
            };
            tracker.fail(shown);
            println!("{}", shown.red());
            tracing::debug!("pdf upload failed: {err}");
            Err(err)
        }
    }
}
