use crate::error::{Error, Result};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};

/// Pulls raw text out of an uploaded document, dispatching on the file
/// extension: PDF pages and DOCX paragraphs are joined with newlines, TXT is
/// decoded as UTF-8. Anything else is rejected before any decoding happens.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => {
            let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
                .map_err(|e| Error::Extraction(format!("PDF extraction failed: {}", e)))?;
            Ok(pages.join("\n"))
        }
        "docx" => extract_docx_text(bytes),
        "txt" => String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Extraction(format!("File is not valid UTF-8 text: {}", e))),
        other => Err(Error::UnsupportedFormat(format!(
            "'{}' is not supported; upload PDF, DOCX or TXT",
            if other.is_empty() { filename } else { other }
        ))),
    }
}

fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| Error::Extraction(format!("DOCX extraction failed: {}", e)))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_is_decoded_as_utf8() {
        let text = extract_text("quiz.txt", "1. Q?\na) x\n".as_bytes()).unwrap();
        assert_eq!(text, "1. Q?\na) x\n");
    }

    #[test]
    fn invalid_utf8_txt_fails_extraction() {
        let err = extract_text("quiz.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = extract_text("slides.pptx", b"anything").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let err = extract_text("README", b"anything").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let text = extract_text("QUIZ.TXT", b"hello").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn corrupt_pdf_fails_extraction() {
        let err = extract_text("quiz.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
