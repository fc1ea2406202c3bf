//! PDF first-page text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::TextSource;
use crate::error::PdfError;

/// Production text source reading the embedded text layer of a PDF.
pub struct PdfTextSource;

impl PdfTextSource {
    /// Create a new PDF text source.
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, path: &Path) -> Result<String, PdfError> {
        let data = fs::read(path).map_err(|e| PdfError::Parse(e.to_string()))?;

        let mut doc = Document::load_mem(&data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let text = pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if page_count <= 1 {
            return Ok(text);
        }

        // Multi-page document: keep page one's share of the lines.
        let lines: Vec<&str> = text.lines().collect();
        let per_page = lines.len() / page_count;
        debug!(
            pages = page_count,
            "multi-page document, keeping first page only"
        );
        Ok(lines[..per_page.min(lines.len())].join("\n"))
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextSource {
    fn first_page_text(&self, path: &Path) -> String {
        match self.extract(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "text extraction failed: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf").unwrap();

        let source = PdfTextSource::new();
        assert_eq!(source.first_page_text(&path), "");
    }

    #[test]
    fn missing_file_yields_empty_text() {
        let source = PdfTextSource::new();
        assert_eq!(source.first_page_text(Path::new("/no/such/file.pdf")), "");
    }
}
