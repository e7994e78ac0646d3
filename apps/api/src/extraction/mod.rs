//! Plain-text extraction from uploaded PDF and DOCX resumes.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload a PDF or DOCX file.")]
    UnsupportedFileType(String),

    #[error("Unable to extract text from the PDF document: {0}")]
    Pdf(String),

    #[error("Unable to read the DOCX document: {0}")]
    Docx(String),

    #[error("No readable text found in '{0}'")]
    NoText(String),

    #[error("Document extraction was aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Decides the kind from the file extension, falling back to magic bytes
    /// when the name carries no recognised extension.
    pub fn detect(filename: &str, data: &[u8]) -> Result<Self, ExtractionError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some(other) => Err(ExtractionError::UnsupportedFileType(format!(".{other}"))),
            None if data.starts_with(b"%PDF-") => Ok(DocumentKind::Pdf),
            None if data.len() > 4 && data.starts_with(b"PK") => Ok(DocumentKind::Docx),
            None => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// Extracts plain text from an uploaded document. CPU-bound; call from
/// `spawn_blocking` in async contexts (see `extract_text_async`).
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, ExtractionError> {
    let kind = DocumentKind::detect(filename, data)?;
    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(data)?,
        DocumentKind::Docx => docx::extract_docx_text(data)?,
    };

    debug!(?kind, filename, chars = text.len(), "Extracted document text");

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText(filename.to_string()));
    }
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. A panic inside the PDF library
/// surfaces as `ExtractionError::Aborted` instead of taking down the worker.
pub async fn extract_text_async(filename: String, data: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&filename, &data))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension_case_insensitive() {
        assert_eq!(DocumentKind::detect("cv.PDF", b"").unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect("Jane Roe.Resume.docx", b"").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_rejects_other_extensions() {
        let err = DocumentKind::detect("resume.txt", b"%PDF-1.7").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFileType(ref ext) if ext == ".txt"));

        let err = DocumentKind::detect("resume.doc", b"").unwrap_err();
        assert!(err.to_string().contains("Please upload a PDF or DOCX file"));
    }

    #[test]
    fn test_detect_falls_back_to_magic_bytes() {
        assert_eq!(
            DocumentKind::detect("resume", b"%PDF-1.4 ...").unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect("upload", b"PK\x03\x04rest").unwrap(),
            DocumentKind::Docx
        );
        assert!(DocumentKind::detect("upload", b"hello").is_err());
    }

    #[test]
    fn test_extract_text_from_docx() {
        let data = docx::tests::sample_docx(&["Jane Roe", "Rust Engineer"]);
        let text = extract_text("resume.docx", &data).unwrap();
        assert_eq!(text, "Jane Roe\nRust Engineer");
    }

    #[test]
    fn test_extract_text_empty_docx_is_no_text() {
        let data = docx::tests::sample_docx(&["", "   "]);
        let err = extract_text("blank.docx", &data).unwrap_err();
        assert!(matches!(err, ExtractionError::NoText(ref name) if name == "blank.docx"));
    }

    #[test]
    fn test_extract_text_garbage_pdf_is_error() {
        let err = extract_text("resume.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_extract_text_async_runs_on_blocking_pool() {
        let data = docx::tests::sample_docx(&["Skills: Rust, SQL"]);
        let text = extract_text_async("cv.docx".to_string(), Bytes::from(data))
            .await
            .unwrap();
        assert_eq!(text, "Skills: Rust, SQL");
    }
}
