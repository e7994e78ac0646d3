use std::panic;

use super::ExtractionError;

/// Concatenated text of every page. `pdf-extract` can panic on malformed
/// input, so the call is isolated and a panic is reported as a PDF error.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf(
            "the document structure could not be read".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_pdf_is_error() {
        let err = extract_pdf_text(b"%PDF-1.4\n1 0 obj\n<<").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Unable to extract text from the PDF document"));
    }
}
