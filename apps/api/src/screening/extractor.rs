//! Document text extraction. Fail-soft: a document that cannot be read yields
//! an empty string and a logged warning, never an error.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Format declared by the file extension, if it is one we read.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    /// Extension first, then the `%PDF-` magic bytes.
    pub fn detect(filename: &str, head: &[u8]) -> Option<Self> {
        Self::from_filename(filename)
            .or_else(|| head.starts_with(PDF_MAGIC).then_some(DocumentFormat::Pdf))
    }
}

/// A resume as received: opaque bytes plus declared format.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

impl ResumeDocument {
    pub fn new(bytes: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}

/// Extracts plain text. Returns `""` if the document cannot be parsed.
pub fn extract_text(document: &ResumeDocument) -> String {
    match document.format {
        DocumentFormat::PlainText => String::from_utf8_lossy(&document.bytes).into_owned(),
        DocumentFormat::Pdf => match extract_pdf_pages(&document.bytes) {
            Ok(pages) => {
                debug!("Extracted {} PDF pages", pages.len());
                pages.concat()
            }
            Err(e) => {
                warn!("PDF read error ({} bytes): {e}", document.bytes.len());
                String::new()
            }
        },
    }
}

/// Page-by-page extraction. A page with no text comes back as `""`.
fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    // The parser panics on some malformed inputs instead of returning an error.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match outcome {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(ExtractionError::Parse(e.to_string())),
        Err(payload) => Err(ExtractionError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// One page per entry, each line shown with Helvetica at 12pt. An empty entry is a blank page.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations }.encode().unwrap();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ],
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pdf_pages_extracted_in_order() {
        let bytes = pdf_with_pages(&["Jane Doe Python developer", "", "SQL and AWS"]);
        let pages = extract_pdf_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].trim(), "Jane Doe Python developer");
        assert_eq!(pages[1], "");
        assert_eq!(pages[2].trim(), "SQL and AWS");
    }

    #[test]
    fn test_pdf_pages_joined_without_separator() {
        let bytes = pdf_with_pages(&["Jane Doe Python developer", "", "SQL and AWS"]);
        let doc = ResumeDocument::new(bytes.clone(), DocumentFormat::Pdf);
        let text = extract_text(&doc);
        assert_eq!(text, extract_pdf_pages(&bytes).unwrap().concat());
        assert_eq!(text, "\n\nJane Doe Python developer\n\nSQL and AWS");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        let doc = ResumeDocument::new(&b"%PDF-1.4 this is not really a pdf"[..], DocumentFormat::Pdf);
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn test_random_bytes_yield_empty_text() {
        let doc = ResumeDocument::new(vec![0u8, 159, 146, 150, 7, 7], DocumentFormat::Pdf);
        assert_eq!(extract_text(&doc), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let doc = ResumeDocument::new(&b"Python developer"[..], DocumentFormat::PlainText);
        assert_eq!(extract_text(&doc), "Python developer");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_filename("CV.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_filename("cv.txt"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_filename("cv.docx"), None);
        assert_eq!(DocumentFormat::from_filename("cv"), None);
    }

    #[test]
    fn test_detect_prefers_extension_then_magic() {
        assert_eq!(DocumentFormat::detect("upload", b"%PDF-1.7"), Some(DocumentFormat::Pdf));
        assert_eq!(
            DocumentFormat::detect("notes.txt", b"%PDF-1.7"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::detect("upload", b"hello"), None);
    }
}
