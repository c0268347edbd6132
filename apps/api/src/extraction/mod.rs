//! Document text extraction for resume uploads.
//!
//! Produces the plain text the ATS engine consumes. The engine itself never sees bytes.

mod docx;

use thiserror::Error;

pub use docx::extract_docx_text;
#[cfg(test)]
pub(crate) use docx::build_docx;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Upload formats recognized by file name or content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the file extension first, then the content type.
    /// Anything unrecognized is treated as plain text.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let name = file_name.unwrap_or_default().to_lowercase();
        let mime = content_type.unwrap_or_default().to_lowercase();

        if name.ends_with(".pdf") || mime == "application/pdf" {
            DocumentKind::Pdf
        } else if name.ends_with(".docx") || mime.contains("wordprocessingml") {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::PlainText => "text",
        }
    }
}

/// Extracts plain text from an uploaded document.
///
/// CPU-bound for PDF and DOCX; async callers should run it on the blocking pool.
/// A leading byte-order mark is dropped from plain text.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string())),
        DocumentKind::Docx => extract_docx_text(bytes),
        DocumentKind::PlainText => {
            let text = String::from_utf8_lossy(bytes);
            Ok(text.strip_prefix('\u{feff}').unwrap_or(&text[..]).to_string())
        }
    }
}
