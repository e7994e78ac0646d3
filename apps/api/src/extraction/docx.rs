use std::io::{Cursor, Read};

use quick_xml::{events::Event, Reader as XmlReader};
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph texts of the main document part, joined with newlines.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractionError::Docx(format!("missing {DOCUMENT_PART}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    paragraphs_from_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Paragraphs in the order they close. Text boxes nest `w:p` inside `w:p`,
/// so open paragraphs are kept on a stack and an inner one never clobbers
/// the text its parent collected so far.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_node = true,
                b"w:p" => open.push(String::new()),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match (e.name().as_ref(), open.last_mut()) {
                (b"w:tab", Some(current)) => current.push('\t'),
                (b"w:br" | b"w:cr", Some(current)) => current.push('\n'),
                (b"w:p", _) => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let (true, Some(current)) = (in_text_node, open.last_mut()) {
                    let value = e
                        .unescape()
                        .map_err(|err| ExtractionError::Docx(err.to_string()))?;
                    current.push_str(&value);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_node = false,
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractionError::Docx(format!("malformed XML: {err}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Builds a minimal DOCX package whose body holds one `w:p` per entry.
    pub(crate) fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
            .collect();
        package_with_document(&document_xml(&body))
    }

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn package_with_document(xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default();
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let data = sample_docx(&["John Doe", "Software Engineer", "Experience:"]);
        assert_eq!(
            extract_docx_text(&data).unwrap(),
            "John Doe\nSoftware Engineer\nExperience:"
        );
    }

    #[test]
    fn test_runs_within_paragraph_concatenate() {
        let body = r#"<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Developer</w:t></w:r><w:r><w:tab/><w:t>2020</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Skills &amp; Tools</w:t></w:r></w:p>"#;
        let data = package_with_document(&document_xml(body));
        assert_eq!(
            extract_docx_text(&data).unwrap(),
            "Senior Developer\t2020\n\nSkills & Tools"
        );
    }

    #[test]
    fn test_non_text_elements_ignored() {
        let body = r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Summary</w:t></w:r></w:p>"#;
        let data = package_with_document(&document_xml(body));
        assert_eq!(extract_docx_text(&data).unwrap(), "Summary");
    }

    #[test]
    fn test_text_box_paragraph_keeps_outer_text() {
        let body = r#"<w:p><w:r><w:t xml:space="preserve">Lead engineer </w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Callout</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t>at Acme</w:t></w:r></w:p>"#;
        let data = package_with_document(&document_xml(body));
        assert_eq!(
            extract_docx_text(&data).unwrap(),
            "Callout\nLead engineer at Acme"
        );
    }

    #[test]
    fn test_not_a_zip_is_error() {
        let err = extract_docx_text(b"plain text pretending to be docx").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_zip_without_document_part_is_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("notes.txt", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let data = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to read the DOCX document: missing word/document.xml"
        );
    }
}
