//! Client-side validation for knowledge submissions.
//!
//! Everything here runs before any network call; a failure means no request
//! is issued at all.

use crate::error::MagpieError;
use std::path::{Path, PathBuf};

/// Maximum accepted PDF size: 10 MiB.
pub const MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;

/// MIME type accepted for uploads.
pub const PDF_MIME: &str = "application/pdf";

/// Trims the input and checks it parses as a URL.
///
/// Returns the trimmed string, which is what gets submitted.
pub fn normalize_url(input: &str) -> Result<String, MagpieError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MagpieError::validation("Please enter a URL"));
    }
    url::Url::parse(trimmed)
        .map_err(|_| MagpieError::validation("Please enter a valid URL"))?;
    Ok(trimmed.to_string())
}

/// A PDF selected for upload, with the metadata the preflight checks need.
#[derive(Debug, Clone)]
pub struct PdfCandidate {
    pub path: PathBuf,
    /// File name sent as the multipart part's file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type guessed from the file extension.
    pub mime: String,
}

impl PdfCandidate {
    /// Inspects a file on disk without reading its contents.
    pub fn from_path(path: &Path) -> Result<Self, MagpieError> {
        let metadata = std::fs::metadata(path).map_err(|err| {
            MagpieError::storage(format!("cannot read {}: {err}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime,
        })
    }

    /// Rejects anything that is not a PDF within the size limit.
    pub fn validate(&self) -> Result<(), MagpieError> {
        if self.mime != PDF_MIME {
            return Err(MagpieError::validation("Please select a PDF file"));
        }
        if self.size > MAX_PDF_BYTES {
            return Err(MagpieError::validation(format!(
                "File size must be less than {}MB",
                MAX_PDF_BYTES / 1024 / 1024
            )));
        }
        Ok(())
    }
}
