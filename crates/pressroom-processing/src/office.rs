//! Offline conversion of word-processing documents to plain text.
//!
//! DOCX files are ZIP containers; the document body lives in
//! `word/document.xml`. Text runs (`<w:t>`) are concatenated per paragraph
//! and paragraphs are joined with blank lines, matching the paragraph
//! delimiter the content formatter splits on. No network dependency.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use crate::ExtractionError;

fn text_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("static regex"))
}

/// Extract plain text from a DOCX buffer.
///
/// Whitespace-only output is a valid result; an empty or non-ZIP buffer is
/// an `UnsupportedFormat` failure (this also covers legacy binary `.doc`
/// files, which are not ZIP containers).
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    if data.is_empty() {
        return Err(ExtractionError::UnsupportedFormat(
            "empty document".to_string(),
        ));
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| {
        ExtractionError::UnsupportedFormat(format!("not a DOCX container: {}", e))
    })?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            ExtractionError::UnsupportedFormat(format!("missing word/document.xml: {}", e))
        })?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractionError::UnsupportedFormat(format!("unreadable body: {}", e)))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for para_xml in document_xml.split("</w:p>") {
        let mut text = String::new();
        for cap in text_run_re().captures_iter(para_xml) {
            text.push_str(&decode_entities(&cap[1]));
        }
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n\n"))
}

/// Decode the five predefined XML entities.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    /// Build a minimal DOCX container with the given document body XML.
    fn docx_with_body(body: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .expect("start file");
            let xml = format!(
                "<?xml version=\"1.0\"?><w:document><w:body>{}</w:body></w:document>",
                body
            );
            writer.write_all(xml.as_bytes()).expect("write body");
            writer.finish().expect("finish zip");
        }
        buf.into_inner()
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>Acme announces widget.</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Shipping </w:t></w:r><w:r><w:t>next year.</w:t></w:r></w:p>",
        );
        let text = extract_docx_text(&docx).expect("extract");
        assert_eq!(text, "Acme announces widget.\n\nShipping next year.");
    }

    #[test]
    fn test_skips_empty_paragraphs() {
        let docx = docx_with_body(
            "<w:p><w:r><w:t>First</w:t></w:r></w:p><w:p></w:p>\
             <w:p><w:r><w:t>Second</w:t></w:r></w:p>",
        );
        let text = extract_docx_text(&docx).expect("extract");
        assert_eq!(text, "First\n\nSecond");
    }

    #[test]
    fn test_decodes_xml_entities() {
        let docx = docx_with_body("<w:p><w:r><w:t>Profit &amp; Loss &lt;2026&gt;</w:t></w:r></w:p>");
        let text = extract_docx_text(&docx).expect("extract");
        assert_eq!(text, "Profit & Loss <2026>");
    }

    #[test]
    fn test_preserves_space_attribute_runs() {
        let docx =
            docx_with_body("<w:p><w:r><w:t xml:space=\"preserve\">  spaced  </w:t></w:r></w:p>");
        let text = extract_docx_text(&docx).expect("extract");
        assert_eq!(text, "  spaced  ");
    }

    #[test]
    fn test_rejects_non_zip_payload() {
        let err = extract_docx_text(b"\xD0\xCF\x11\xE0legacy doc bytes").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_empty_payload() {
        let err = extract_docx_text(b"").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_zip_without_document_xml() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_docx_text(&buf.into_inner()).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }
}
